//! Reporting: one row-selection layer feeding an HTML renderer and a CSV
//! exporter, so the two formats cannot drift apart.

pub mod csv;
pub mod html;
pub mod logic;
pub mod range;
pub mod rows;

pub use logic::{ReportLogic, ReportRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    View,
    Csv,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(ReportFormat::View),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

/// What a report run produced. Unknown type/subtype combinations are a
/// first-class outcome, not an error: the caller renders a notice and
/// exits cleanly.
#[derive(Debug)]
pub enum ReportOutput {
    Html(String),
    Csv { filename: String, body: String },
    Unsupported { report_type: String, subtype: String },
}
