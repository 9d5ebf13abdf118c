//! Date-range resolution for attendance reports.

use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_start, parse_date, week_start};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    /// Today only.
    Daily,
    /// Monday of the current week through today.
    Weekly,
    /// First of the current month through today.
    Monthly,
    /// Explicit inclusive bounds.
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportRange {
    /// Parse a `START:END` spec (both `YYYY-MM-DD`).
    pub fn parse_custom(spec: &str) -> AppResult<Self> {
        let (start_str, end_str) = spec
            .split_once(':')
            .ok_or_else(|| AppError::InvalidDate(spec.to_string()))?;

        let start =
            parse_date(start_str).ok_or_else(|| AppError::InvalidDate(start_str.to_string()))?;
        let end = parse_date(end_str).ok_or_else(|| AppError::InvalidDate(end_str.to_string()))?;

        Ok(ReportRange::Custom { start, end })
    }

    /// Inclusive (start, end) bounds relative to `today`.
    pub fn resolve(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ReportRange::Daily => (today, today),
            ReportRange::Weekly => (week_start(today), today),
            ReportRange::Monthly => (month_start(today), today),
            ReportRange::Custom { start, end } => (start, end),
        }
    }
}
