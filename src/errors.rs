//! Unified application error type.
//! All modules (db, core, cli, report) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Start date cannot be after end date ({start} > {end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Cannot apply for past dates (start {0})")]
    PastDate(NaiveDate),

    #[error("Invalid name '{0}': first and last name need at least 2 characters")]
    InvalidName(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    // ---------------------------
    // Authorization
    // ---------------------------
    // Deliberately generic: no detail about the denied action leaks out.
    #[error("Unauthorized access")]
    Unauthorized,

    // ---------------------------
    // Lookup failures
    // ---------------------------
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    // ---------------------------
    // State conflicts
    // ---------------------------
    #[error("Already checked in today")]
    AlreadyCheckedIn,

    #[error("Already checked out today")]
    AlreadyCheckedOut,

    #[error("Must check in first")]
    NotCheckedIn,

    #[error("Leave request already {0}")]
    LeaveAlreadyDecided(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
