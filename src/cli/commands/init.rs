use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::{audit, initialize::init_db};
use crate::errors::AppResult;
use crate::ui::messages;
use rusqlite::Connection;

/// Handle the `init` command
///
/// Creates:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = Config::load();
    let db_path = cli.db.clone().unwrap_or(cfg.database);

    messages::info(format!("Config file : {}", Config::config_file().display()));
    messages::info(format!("Database    : {}", &db_path));

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    // non-blocking: a failed audit write must not fail init
    if let Err(e) = audit::record(
        &conn,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    ) {
        messages::warning(format!("Failed to write audit log: {}", e));
    }

    messages::success(format!("Database initialized at {}", &db_path));
    Ok(())
}
