use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::core::policy::{self, Action};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date;
use serde_json::json;

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle `check-in`, `check-out` and `status`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open_ready(&cfg.database)?;
    let (_, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

    match &cli.command {
        Commands::CheckIn { json } => {
            policy::authorize(&caller, Action::CheckInOut, Some(caller.user_id))?;
            let now = chrono::Local::now().naive_local();
            let att = AttendanceLogic::check_in(&pool.conn, caller.user_id, now)?;

            let time = att
                .check_in
                .map(|t| t.format(DATETIME_FMT).to_string())
                .unwrap_or_default();
            if *json {
                println!(
                    "{}",
                    json!({
                        "success": true,
                        "message": "Checked in successfully",
                        "check_in": time,
                    })
                );
            } else {
                messages::success(format!("Checked in at {}", time));
            }
        }

        Commands::CheckOut { json } => {
            policy::authorize(&caller, Action::CheckInOut, Some(caller.user_id))?;
            let now = chrono::Local::now().naive_local();
            let att = AttendanceLogic::check_out(&pool.conn, caller.user_id, now)?;

            let time = att
                .check_out
                .map(|t| t.format(DATETIME_FMT).to_string())
                .unwrap_or_default();
            if *json {
                println!(
                    "{}",
                    json!({
                        "success": true,
                        "message": "Checked out successfully",
                        "check_out": time,
                        "hours_worked": att.hours_worked,
                    })
                );
            } else {
                messages::success(format!(
                    "Checked out at {} ({:.2} hours worked)",
                    time, att.hours_worked
                ));
            }
        }

        Commands::Status { date: day, json } => {
            let day = match day {
                Some(s) => {
                    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?
                }
                None => date::today(),
            };
            let status = AttendanceLogic::status_for(&pool.conn, caller.user_id, day)?;

            if *json {
                println!(
                    "{}",
                    json!({
                        "date": day.format("%Y-%m-%d").to_string(),
                        "status": status.to_db_str(),
                    })
                );
            } else {
                messages::info(format!("{}: {}", day.format("%Y-%m-%d"), status.label()));
            }
        }

        _ => {}
    }
    Ok(())
}
