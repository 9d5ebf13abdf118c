//! Leave request storage and decision updates.

use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveDuration, LeaveRequest, LeaveStatus, LeaveType};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn bad_text(field: &'static str, value: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(AppError::InvalidValue { field, value }),
    )
}

pub fn map_row(row: &Row) -> Result<LeaveRequest> {
    let type_str: String = row.get("leave_type")?;
    let leave_type =
        LeaveType::from_db_str(&type_str).ok_or_else(|| bad_text("leave_type", type_str))?;

    let duration_str: String = row.get("duration")?;
    let duration = LeaveDuration::from_db_str(&duration_str)
        .ok_or_else(|| bad_text("duration", duration_str))?;

    let status_str: String = row.get("status")?;
    let status =
        LeaveStatus::from_db_str(&status_str).ok_or_else(|| bad_text("status", status_str))?;

    let start_str: String = row.get("start_date")?;
    let start_date = NaiveDate::parse_from_str(&start_str, DATE_FMT)
        .map_err(|_| bad_text("start_date", start_str))?;

    let end_str: String = row.get("end_date")?;
    let end_date =
        NaiveDate::parse_from_str(&end_str, DATE_FMT).map_err(|_| bad_text("end_date", end_str))?;

    let approved_at: Option<String> = row.get("approved_at")?;
    let approved_at = approved_at
        .map(|s| {
            NaiveDateTime::parse_from_str(&s, DATETIME_FMT).map_err(|_| bad_text("approved_at", s))
        })
        .transpose()?;

    Ok(LeaveRequest {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        leave_type,
        start_date,
        end_date,
        duration,
        reason: row.get("reason")?,
        status,
        approved_by: row.get("approved_by")?,
        approved_at,
        admin_comments: row.get("admin_comments")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(conn: &Connection, req: &LeaveRequest) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO leave_requests (employee_id, leave_type, start_date, end_date,
                                     duration, reason, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))",
        params![
            req.employee_id,
            req.leave_type.to_db_str(),
            req.start_date.format(DATE_FMT).to_string(),
            req.end_date.format(DATE_FMT).to_string(),
            req.duration.to_db_str(),
            req.reason,
            req.status.to_db_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<LeaveRequest>> {
    let mut stmt = conn.prepare("SELECT * FROM leave_requests WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn require(conn: &Connection, id: i64) -> AppResult<LeaveRequest> {
    find(conn, id)?.ok_or(AppError::NotFound {
        entity: "Leave request",
        id: id.to_string(),
    })
}

/// Write the decision fields. The caller decides the surrounding
/// transaction; approval couples this with the attendance rewrite.
pub fn update_decision(
    conn: &Connection,
    id: i64,
    status: LeaveStatus,
    approver_id: i64,
    approved_at: NaiveDateTime,
    comments: &str,
) -> AppResult<()> {
    conn.execute(
        "UPDATE leave_requests
         SET status = ?1, approved_by = ?2, approved_at = ?3, admin_comments = ?4
         WHERE id = ?5",
        params![
            status.to_db_str(),
            approver_id,
            approved_at.format(DATETIME_FMT).to_string(),
            comments,
            id,
        ],
    )?;
    Ok(())
}

/// Approved request covering `date`, if any. Drives the status precedence
/// rule for the "today" display.
pub fn approved_covering(
    conn: &Connection,
    employee_id: i64,
    date: NaiveDate,
) -> AppResult<Option<LeaveRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM leave_requests
         WHERE employee_id = ?1
           AND status = 'approved'
           AND start_date <= ?2 AND end_date >= ?2
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![employee_id, date.format(DATE_FMT).to_string()], map_row)
        .optional()?)
}

/// Approved requests whose start_date falls in the current calendar year.
/// The leave balance report counts requests, not days.
pub fn count_approved_since(
    conn: &Connection,
    employee_id: i64,
    year_start: NaiveDate,
) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM leave_requests
         WHERE employee_id = ?1 AND status = 'approved' AND start_date >= ?2",
        params![employee_id, year_start.format(DATE_FMT).to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn list_for_employee(conn: &Connection, employee_id: i64) -> AppResult<Vec<LeaveRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM leave_requests
         WHERE employee_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([employee_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_for_company(conn: &Connection, company_id: i64) -> AppResult<Vec<LeaveRequest>> {
    let mut stmt = conn.prepare(
        "SELECT l.* FROM leave_requests l
         JOIN users u ON u.id = l.employee_id
         WHERE u.company_id = ?1
         ORDER BY l.created_at DESC, l.id DESC",
    )?;

    let rows = stmt.query_map([company_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
