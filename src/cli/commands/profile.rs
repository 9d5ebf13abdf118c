use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands, ProfileAction};
use crate::config::Config;
use crate::core::profile::ProfileLogic;
use crate::db::identity;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::profile::UserCertification;
use crate::ui::messages;
use crate::utils::date;
use crate::utils::table::Table;

fn parse_opt_date(s: Option<&String>) -> AppResult<Option<chrono::NaiveDate>> {
    s.map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())))
        .transpose()
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let action = match &cli.command {
        Commands::Profile { action } => action,
        _ => return Ok(()),
    };

    let pool = DbPool::open_ready(&cfg.database)?;
    let (user, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

    match action {
        ProfileAction::Show { employee } => {
            let target = match employee {
                Some(login) => identity::require_user_by_login(&pool.conn, login)?,
                None => user,
            };

            let details = ProfileLogic::details(&pool.conn, &caller, target.id)?;
            messages::header(format!("Profile: {}", target.full_name()));
            println!("Login ID       : {}", target.login_id);
            println!("Email          : {}", target.email);
            println!("Department     : {}", target.department.as_deref().unwrap_or("-"));
            println!("Position       : {}", target.position.as_deref().unwrap_or("-"));
            println!(
                "Date of birth  : {}",
                details
                    .date_of_birth
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("Nationality    : {}", details.nationality.as_deref().unwrap_or("-"));
            println!("Personal email : {}", details.personal_email.as_deref().unwrap_or("-"));
            println!("Bank           : {}", details.bank_name.as_deref().unwrap_or("-"));
            println!("Account        : {}", details.account_number.as_deref().unwrap_or("-"));

            let skills = ProfileLogic::skills(&pool.conn, &caller, target.id)?;
            if !skills.is_empty() {
                let mut table = Table::new(&["ID", "Skill", "Level"]);
                for s in &skills {
                    table.add_row(vec![
                        s.id.to_string(),
                        s.skill_name.clone(),
                        s.proficiency_level.clone().unwrap_or_default(),
                    ]);
                }
                messages::header("Skills");
                print!("{}", table.render());
            }

            let certs = ProfileLogic::certifications(&pool.conn, &caller, target.id)?;
            if !certs.is_empty() {
                let mut table = Table::new(&["ID", "Certification", "Issuer", "Expires"]);
                for c in &certs {
                    table.add_row(vec![
                        c.id.to_string(),
                        c.certification_name.clone(),
                        c.issuing_organization.clone().unwrap_or_default(),
                        c.expiry_date.map(|d| d.to_string()).unwrap_or_default(),
                    ]);
                }
                messages::header("Certifications");
                print!("{}", table.render());
            }
        }

        ProfileAction::Update {
            employee,
            date_of_birth,
            address,
            nationality,
            personal_email,
            gender,
            marital_status,
            account_number,
            bank_name,
            ifsc_code,
            pan_number,
            uan_number,
            employee_code,
        } => {
            let target = match employee {
                Some(login) => identity::require_user_by_login(&pool.conn, login)?,
                None => user,
            };

            // start from the stored record so untouched fields survive
            let mut details = ProfileLogic::details(&pool.conn, &caller, target.id)?;
            details.user_id = target.id;

            if let Some(d) = parse_opt_date(date_of_birth.as_ref())? {
                details.date_of_birth = Some(d);
            }
            if address.is_some() {
                details.residential_address = address.clone();
            }
            if nationality.is_some() {
                details.nationality = nationality.clone();
            }
            if personal_email.is_some() {
                details.personal_email = personal_email.clone();
            }
            if gender.is_some() {
                details.gender = gender.clone();
            }
            if marital_status.is_some() {
                details.marital_status = marital_status.clone();
            }
            if account_number.is_some() {
                details.account_number = account_number.clone();
            }
            if bank_name.is_some() {
                details.bank_name = bank_name.clone();
            }
            if ifsc_code.is_some() {
                details.ifsc_code = ifsc_code.clone();
            }
            if pan_number.is_some() {
                details.pan_number = pan_number.clone();
            }
            if uan_number.is_some() {
                details.uan_number = uan_number.clone();
            }
            if employee_code.is_some() {
                details.employee_code = employee_code.clone();
            }

            ProfileLogic::save_details(&pool.conn, &caller, &details)?;
            messages::success(format!("Profile updated for {}", target.login_id));
        }

        ProfileAction::AddSkill { name, level } => {
            let id =
                ProfileLogic::add_skill(&pool.conn, &caller, caller.user_id, name, level.as_deref())?;
            messages::success(format!("Skill #{} added", id));
        }

        ProfileAction::DelSkill { id } => {
            ProfileLogic::delete_skill(&pool.conn, &caller, *id)?;
            messages::success(format!("Skill #{} deleted", id));
        }

        ProfileAction::AddCert {
            name,
            org,
            issued,
            expires,
            credential,
        } => {
            let cert = UserCertification {
                id: 0,
                user_id: caller.user_id,
                certification_name: name.clone(),
                issuing_organization: org.clone(),
                issue_date: parse_opt_date(issued.as_ref())?,
                expiry_date: parse_opt_date(expires.as_ref())?,
                credential_id: credential.clone(),
                created_at: chrono::Local::now().to_rfc3339(),
            };
            let id = ProfileLogic::add_certification(&pool.conn, &caller, &cert)?;
            messages::success(format!("Certification #{} added", id));
        }

        ProfileAction::DelCert { id } => {
            ProfileLogic::delete_certification(&pool.conn, &caller, *id)?;
            messages::success(format!("Certification #{} deleted", id));
        }
    }
    Ok(())
}
