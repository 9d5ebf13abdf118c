use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands, PayrollAction};
use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let action = match &cli.command {
        Commands::Payroll { action } => action,
        _ => return Ok(()),
    };

    let mut pool = DbPool::open_ready(&cfg.database)?;
    let (_, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

    match action {
        PayrollAction::Increment { percent } => {
            let updated = PayrollLogic::bulk_increment(&mut pool.conn, &caller, *percent)?;
            messages::success(format!(
                "Applied {}% increment to {} employee(s)",
                percent, updated
            ));
        }
        PayrollAction::Bonus { amount } => {
            let updated = PayrollLogic::bulk_bonus(&mut pool.conn, &caller, *amount)?;
            messages::success(format!(
                "Applied bonus of {:.2} to {} employee(s)",
                amount, updated
            ));
        }
    }
    Ok(())
}
