//! dayflow library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod report;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Register { .. } => cli::commands::register::handle(cli, cfg),
        Commands::CheckIn { .. } | Commands::CheckOut { .. } | Commands::Status { .. } => {
            cli::commands::attendance::handle(cli, cfg)
        }
        Commands::Leave { .. } => cli::commands::leave::handle(cli, cfg),
        Commands::Salary { .. } => cli::commands::salary::handle(cli, cfg),
        Commands::Payroll { .. } => cli::commands::payroll::handle(cli, cfg),
        Commands::Report { .. } => cli::commands::report::handle(cli, cfg),
        Commands::Profile { .. } => cli::commands::profile::handle(cli, cfg),
        Commands::Manager { .. } => cli::commands::manager::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load();

    // command-line DB override wins over the config file
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
