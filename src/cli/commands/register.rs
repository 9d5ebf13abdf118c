use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::identity::{IdentityLogic, RegisterInput};
use crate::db::identity;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Caller, Role};
use crate::ui::messages;
use crate::utils::date;

/// Register a new employee and print the generated credentials.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        company,
        first_name,
        last_name,
        email,
        phone,
        role,
        department,
        position,
    } = &cli.command
    {
        let role = Role::from_db_str(role).ok_or_else(|| AppError::InvalidValue {
            field: "role",
            value: role.clone(),
        })?;

        let mut pool = DbPool::open_ready(&cfg.database)?;

        // The very first registration bootstraps the admin account and
        // runs without a caller.
        let caller: Option<Caller> = match cli.acting.as_deref() {
            Some(login) => Some(Caller::of(&identity::require_user_by_login(
                &pool.conn, login,
            )?)),
            None => None,
        };

        let reg = IdentityLogic::register(
            &mut pool.conn,
            caller.as_ref(),
            &RegisterInput {
                company_name: company,
                first_name,
                last_name,
                email,
                phone: phone.as_deref(),
                role,
                department: department.as_deref(),
                position: position.as_deref(),
            },
            date::today(),
        )?;

        messages::success(format!("Registered {} {}", first_name, last_name));
        messages::info(format!("Login ID      : {}", reg.login_id));
        messages::info(format!("Temp password : {}", reg.temp_password));
        messages::warning("The password must be changed on first login.");
    }
    Ok(())
}
