//! Attendance ledger rows: one per (employee, calendar date).

use crate::errors::{AppError, AppResult};
use crate::models::attendance::{Attendance, AttendanceStatus};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_datetime(col: &str, s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(format!("{col}: {s}"))),
        )
    })
}

pub fn map_row(row: &Row) -> Result<Attendance> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let check_in: Option<String> = row.get("check_in")?;
    let check_in = check_in
        .map(|s| parse_datetime("check_in", &s))
        .transpose()?;

    let check_out: Option<String> = row.get("check_out")?;
    let check_out = check_out
        .map(|s| parse_datetime("check_out", &s))
        .transpose()?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidValue {
                field: "status",
                value: status_str.clone(),
            }),
        )
    })?;

    Ok(Attendance {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date,
        check_in,
        check_out,
        status,
        hours_worked: row.get("hours_worked")?,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_day(
    conn: &Connection,
    employee_id: i64,
    date: NaiveDate,
) -> AppResult<Option<Attendance>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE employee_id = ?1 AND date = ?2",
    )?;
    Ok(stmt
        .query_row(
            params![employee_id, date.format(DATE_FMT).to_string()],
            map_row,
        )
        .optional()?)
}

pub fn insert(conn: &Connection, att: &Attendance) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance (employee_id, date, check_in, check_out,
                                 status, hours_worked, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
        params![
            att.employee_id,
            att.date.format(DATE_FMT).to_string(),
            att.check_in.map(|t| t.format(DATETIME_FMT).to_string()),
            att.check_out.map(|t| t.format(DATETIME_FMT).to_string()),
            att.status.to_db_str(),
            att.hours_worked,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, att: &Attendance) -> AppResult<()> {
    conn.execute(
        "UPDATE attendance
         SET check_in = ?1, check_out = ?2, status = ?3, hours_worked = ?4
         WHERE id = ?5",
        params![
            att.check_in.map(|t| t.format(DATETIME_FMT).to_string()),
            att.check_out.map(|t| t.format(DATETIME_FMT).to_string()),
            att.status.to_db_str(),
            att.hours_worked,
            att.id,
        ],
    )?;
    Ok(())
}

/// Force a day's status, creating the row when missing. Used by the leave
/// reconciliation loop; intentionally overwrites whatever status is there.
pub fn set_day_status(
    conn: &Connection,
    employee_id: i64,
    date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<()> {
    match find_by_day(conn, employee_id, date)? {
        Some(mut att) => {
            att.status = status;
            update(conn, &att)?;
        }
        None => {
            let att = Attendance::new(employee_id, date, status);
            insert(conn, &att)?;
        }
    }
    Ok(())
}

/// Company-scoped ledger rows in [start, end] inclusive, the row selection
/// every attendance report shares.
pub fn list_company_range(
    conn: &Connection,
    company_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<Attendance>> {
    let mut stmt = conn.prepare(
        "SELECT a.* FROM attendance a
         JOIN users u ON u.id = a.employee_id
         WHERE u.company_id = ?1 AND a.date BETWEEN ?2 AND ?3
         ORDER BY a.date ASC, a.employee_id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            company_id,
            start.format(DATE_FMT).to_string(),
            end.format(DATE_FMT).to_string(),
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
