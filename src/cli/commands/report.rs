use crate::cli::commands::resolve_caller;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::report::{ReportFormat, ReportLogic, ReportOutput, ReportRequest};
use crate::ui::messages;
use crate::utils::date;
use std::fs;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        report_type,
        subtype,
        range,
        format,
        file,
    } = &cli.command
    {
        let format = ReportFormat::parse(format).ok_or_else(|| AppError::InvalidValue {
            field: "format",
            value: format.clone(),
        })?;

        let pool = DbPool::open_ready(&cfg.database)?;
        let (_, caller) = resolve_caller(&pool.conn, cli.acting.as_deref())?;

        let output = ReportLogic::generate(
            &pool.conn,
            &caller,
            &ReportRequest {
                report_type,
                subtype,
                range_spec: range.as_deref(),
                format,
            },
            date::today(),
            &cfg.currency_symbol,
        )?;

        match output {
            ReportOutput::Html(html) => print!("{}", html),
            ReportOutput::Csv { filename, body } => {
                let path = file.clone().unwrap_or(filename);
                fs::write(&path, body)?;
                messages::success(format!("Report written to {}", path));
            }
            ReportOutput::Unsupported {
                report_type,
                subtype,
            } => match format {
                ReportFormat::View => {
                    print!("{}", crate::report::html::unsupported_alert(&report_type, &subtype))
                }
                ReportFormat::Csv => {
                    messages::warning(format!("Unsupported report: {} / {}", report_type, subtype))
                }
            },
        }
    }
    Ok(())
}
