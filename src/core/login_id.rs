//! Human-readable login id derivation:
//! `{company_code}{INITIALS}{year}{serial}` where INITIALS are the first
//! two letters of first and last name uppercased and serial is a
//! zero-padded 4-digit counter per `{code}{INITIALS}{year}` prefix.
//!
//! The count-then-insert sequence is racy under concurrent registrations;
//! the UNIQUE constraint on users.login_id is the backstop.

use crate::db::identity::count_login_prefix;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Uppercased initials. Names with fewer than 2 characters are rejected
/// instead of silently truncated.
pub fn initials(first_name: &str, last_name: &str) -> AppResult<String> {
    for name in [first_name, last_name] {
        if name.chars().count() < 2 {
            return Err(AppError::InvalidName(name.to_string()));
        }
    }

    let mut out: String = first_name.chars().take(2).collect();
    out.extend(last_name.chars().take(2));
    Ok(out.to_uppercase())
}

pub fn generate(
    conn: &Connection,
    company_code: &str,
    first_name: &str,
    last_name: &str,
    year: i32,
) -> AppResult<String> {
    let initials = initials(first_name, last_name)?;
    let prefix = format!("{}{}{}", company_code, initials, year);

    let existing = count_login_prefix(conn, &prefix)?;
    let serial = existing + 1;

    Ok(format!("{}{:04}", prefix, serial))
}
