//! Check-in / check-out and the resolved "status for a day" rule.

use crate::db::attendance::{find_by_day, insert, update};
use crate::db::leave::approved_covering;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{Attendance, AttendanceStatus};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Record a check-in at `now`. Fails when today's row already has one;
    /// otherwise creates or completes today's row with status=present.
    pub fn check_in(
        conn: &Connection,
        employee_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Attendance> {
        let today = now.date();

        match find_by_day(conn, employee_id, today)? {
            Some(mut att) => {
                if att.check_in.is_some() {
                    return Err(AppError::AlreadyCheckedIn);
                }
                att.check_in = Some(now);
                att.status = AttendanceStatus::Present;
                update(conn, &att)?;
                Ok(att)
            }
            None => {
                let mut att = Attendance::new(employee_id, today, AttendanceStatus::Present);
                att.check_in = Some(now);
                att.id = insert(conn, &att)?;
                Ok(att)
            }
        }
    }

    /// Record a check-out at `now` and derive hours_worked as fractional
    /// hours, unrounded.
    pub fn check_out(
        conn: &Connection,
        employee_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Attendance> {
        let today = now.date();

        let mut att = match find_by_day(conn, employee_id, today)? {
            Some(att) if att.check_in.is_some() => att,
            _ => return Err(AppError::NotCheckedIn),
        };

        if att.check_out.is_some() {
            return Err(AppError::AlreadyCheckedOut);
        }

        // checked above
        let check_in = att.check_in.ok_or(AppError::NotCheckedIn)?;

        att.check_out = Some(now);
        att.hours_worked = (now - check_in).num_seconds() as f64 / 3600.0;
        update(conn, &att)?;
        Ok(att)
    }

    /// Resolved status with the precedence rule: an approved leave covering
    /// the date wins over everything, then a recorded check-in means
    /// present, else absent. The stored status column is only authoritative
    /// after leave reconciliation has rewritten it.
    pub fn status_for(
        conn: &Connection,
        employee_id: i64,
        date: NaiveDate,
    ) -> AppResult<AttendanceStatus> {
        if approved_covering(conn, employee_id, date)?.is_some() {
            return Ok(AttendanceStatus::Leave);
        }

        match find_by_day(conn, employee_id, date)? {
            Some(att) if att.check_in.is_some() => Ok(AttendanceStatus::Present),
            _ => Ok(AttendanceStatus::Absent),
        }
    }
}
