use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !matches!(&cli.command, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = DbPool::open_ready(&cfg.database)?;
    let entries = audit::load(&pool.conn)?;

    if entries.is_empty() {
        messages::info("Audit log is empty.");
        return Ok(());
    }

    let mut table = Table::new(&["Date", "Operation", "Target", "Message"]);
    for (date, operation, target, message) in &entries {
        table.add_row(vec![
            date.clone(),
            operation.clone(),
            target.clone(),
            message.clone(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
