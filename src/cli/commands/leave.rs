use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands, LeaveAction};
use crate::config::Config;
use crate::core::leave::LeaveLogic;
use crate::db::leave;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveDuration, LeaveType};
use crate::ui::messages;
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let action = match &cli.command {
        Commands::Leave { action } => action,
        _ => return Ok(()),
    };

    let mut pool = DbPool::open_ready(&cfg.database)?;
    let (_, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

    match action {
        LeaveAction::Apply {
            leave_type,
            start,
            end,
            duration,
            reason,
        } => {
            let leave_type =
                LeaveType::from_db_str(leave_type).ok_or_else(|| AppError::InvalidValue {
                    field: "leave_type",
                    value: leave_type.clone(),
                })?;
            let duration =
                LeaveDuration::from_db_str(duration).ok_or_else(|| AppError::InvalidValue {
                    field: "duration",
                    value: duration.clone(),
                })?;
            let start =
                date::parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end = date::parse_date(end).ok_or_else(|| AppError::InvalidDate(end.clone()))?;

            let id = LeaveLogic::apply(
                &pool.conn,
                &caller,
                leave_type,
                start,
                end,
                duration,
                reason,
                date::today(),
            )?;
            messages::success(format!("Leave request #{} submitted", id));
        }

        LeaveAction::Approve { id, comments } => {
            let now = chrono::Local::now().naive_local();
            let req = LeaveLogic::approve(&mut pool.conn, &caller, *id, now, comments)?;
            messages::success(format!(
                "Leave request #{} approved ({} to {})",
                req.id, req.start_date, req.end_date
            ));
        }

        LeaveAction::Reject { id, comments } => {
            let now = chrono::Local::now().naive_local();
            let req = LeaveLogic::reject(&mut pool.conn, &caller, *id, now, comments)?;
            messages::success(format!("Leave request #{} rejected", req.id));
        }

        LeaveAction::List => {
            // staff see the whole company, everyone else their own requests
            let requests = if caller.role.is_staff() {
                leave::list_for_company(&pool.conn, caller.company_id)?
            } else {
                leave::list_for_employee(&pool.conn, caller.user_id)?
            };

            if requests.is_empty() {
                messages::info("No leave requests found.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Employee", "Type", "From", "To", "Status"]);
            for req in &requests {
                table.add_row(vec![
                    req.id.to_string(),
                    req.employee_id.to_string(),
                    req.leave_type.to_db_str().to_string(),
                    req.start_date.to_string(),
                    req.end_date.to_string(),
                    req.status.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
