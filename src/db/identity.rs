//! Companies and users: lookups, inserts and the login-id prefix count the
//! generator relies on.

use crate::errors::{AppError, AppResult};
use crate::models::company::Company;
use crate::models::user::{Role, User};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_company_row(row: &Row) -> Result<Company> {
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        code: row.get("code")?,
        logo: row.get("logo")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_user_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidValue {
                field: "role",
                value: role_str.clone(),
            }),
        )
    })?;

    let date_joined: Option<String> = row.get("date_joined")?;
    let date_joined = match date_joined {
        Some(s) => Some(NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })?),
        None => None,
    };

    Ok(User {
        id: row.get("id")?,
        login_id: row.get("login_id")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone: row.get("phone")?,
        role,
        department: row.get("department")?,
        position: row.get("position")?,
        manager_id: row.get("manager_id")?,
        company_id: row.get("company_id")?,
        profile_picture: row.get("profile_picture")?,
        date_joined,
        is_active: row.get::<_, i64>("is_active")? == 1,
        must_change_password: row.get::<_, i64>("must_change_password")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn find_company_by_name(conn: &Connection, name: &str) -> AppResult<Option<Company>> {
    let mut stmt = conn.prepare("SELECT * FROM companies WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_company_row).optional()?)
}

pub fn insert_company(conn: &Connection, name: &str, code: &str) -> AppResult<Company> {
    conn.execute(
        "INSERT INTO companies (name, code, created_at)
         VALUES (?1, ?2, datetime('now'))",
        params![name, code],
    )?;
    let id = conn.last_insert_rowid();

    let mut stmt = conn.prepare("SELECT * FROM companies WHERE id = ?1")?;
    stmt.query_row([id], map_company_row).map_err(AppError::from)
}

pub fn find_user(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_user_row).optional()?)
}

pub fn find_user_by_login(conn: &Connection, login_id: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE login_id = ?1")?;
    Ok(stmt.query_row([login_id], map_user_row).optional()?)
}

/// Resolve an id that may be missing into a hard NotFound.
pub fn require_user_by_login(conn: &Connection, login_id: &str) -> AppResult<User> {
    find_user_by_login(conn, login_id)?.ok_or(AppError::NotFound {
        entity: "User",
        id: login_id.to_string(),
    })
}

pub fn require_user(conn: &Connection, id: i64) -> AppResult<User> {
    find_user(conn, id)?.ok_or(AppError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// All users of one company, directory order.
pub fn list_company_users(conn: &Connection, company_id: i64) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM users
         WHERE company_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([company_id], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Count of existing login ids sharing `{code}{initials}{year}`.
/// Feeds the serial part of the generator.
pub fn count_login_prefix(conn: &Connection, prefix: &str) -> AppResult<i64> {
    let pattern = format!("{}%", prefix);
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE login_id LIKE ?1",
        [pattern],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Total user count, used for the first-run bootstrap rule.
pub fn users_count(conn: &Connection) -> AppResult<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

pub struct NewUser<'a> {
    pub login_id: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
    pub role: Role,
    pub department: Option<&'a str>,
    pub position: Option<&'a str>,
    pub company_id: i64,
    pub date_joined: NaiveDate,
}

pub fn insert_user(conn: &Connection, user: &NewUser) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (login_id, email, password_hash, first_name, last_name,
                            phone, role, department, position, company_id,
                            date_joined, is_active, must_change_password, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 1, 1, datetime('now'))",
        params![
            user.login_id,
            user.email,
            user.password_hash,
            user.first_name,
            user.last_name,
            user.phone,
            user.role.to_db_str(),
            user.department,
            user.position,
            user.company_id,
            user.date_joined.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_manager(conn: &Connection, employee_id: i64, manager_id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET manager_id = ?1 WHERE id = ?2",
        params![manager_id, employee_id],
    )?;
    Ok(())
}
