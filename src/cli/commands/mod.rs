pub mod attendance;
pub mod init;
pub mod leave;
pub mod log;
pub mod manager;
pub mod payroll;
pub mod profile;
pub mod register;
pub mod report;
pub mod salary;

use crate::db::identity;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Caller, User};
use rusqlite::Connection;

/// Resolve the acting caller from the global `--as` flag. Commands that
/// act on records always need one; registration alone may run without it
/// (first-run bootstrap).
pub(crate) fn resolve_caller(conn: &Connection, acting: Option<&str>) -> AppResult<(User, Caller)> {
    let login = acting.ok_or(AppError::Unauthorized)?;
    let user = identity::require_user_by_login(conn, login)?;
    let caller = Caller::of(&user);
    Ok((user, caller))
}
