use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands, ManagerAction};
use crate::config::Config;
use crate::core::identity::IdentityLogic;
use crate::db::identity;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Manager {
        action: ManagerAction::Assign { employee, manager },
    } = &cli.command
    {
        let pool = DbPool::open_ready(&cfg.database)?;
        let (_, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

        let employee = identity::require_user_by_login(&pool.conn, employee)?;
        let manager = identity::require_user_by_login(&pool.conn, manager)?;

        IdentityLogic::assign_manager(&pool.conn, &caller, &employee, &manager)?;
        messages::success(format!(
            "{} now reports to {}",
            employee.login_id, manager.login_id
        ));
    }
    Ok(())
}
