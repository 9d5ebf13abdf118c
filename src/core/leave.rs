//! Leave workflow: submission validation and the approve/reject state
//! machine, including the attendance reconciliation on approval.

use crate::core::policy::{self, Action};
use crate::db::{attendance, audit, leave};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceStatus;
use crate::models::leave::{LeaveDuration, LeaveRequest, LeaveStatus, LeaveType};
use crate::models::user::Caller;
use crate::utils::date::days_inclusive;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

pub struct LeaveLogic;

impl LeaveLogic {
    /// Submit a leave request for the caller. Validation failures persist
    /// nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        conn: &Connection,
        caller: &Caller,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration: LeaveDuration,
        reason: &str,
        today: NaiveDate,
    ) -> AppResult<i64> {
        policy::authorize(caller, Action::ApplyLeave, Some(caller.user_id))?;

        if start_date > end_date {
            return Err(AppError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        if start_date < today {
            return Err(AppError::PastDate(start_date));
        }

        let req = LeaveRequest {
            id: 0,
            employee_id: caller.user_id,
            leave_type,
            start_date,
            end_date,
            duration,
            reason: reason.to_string(),
            status: LeaveStatus::Pending,
            approved_by: None,
            approved_at: None,
            admin_comments: None,
            created_at: chrono::Local::now().to_rfc3339(),
        };

        leave::insert(conn, &req)
    }

    /// Approve: flip the state and back-fill the attendance ledger for
    /// every day of the range, in one transaction. Existing rows get their
    /// status overwritten with `leave` — even a recorded `present` day.
    pub fn approve(
        conn: &mut Connection,
        caller: &Caller,
        leave_id: i64,
        now: NaiveDateTime,
        comments: &str,
    ) -> AppResult<LeaveRequest> {
        policy::authorize(caller, Action::DecideLeave, None)?;

        let req = leave::require(conn, leave_id)?;
        if req.status.is_terminal() {
            return Err(AppError::LeaveAlreadyDecided(
                req.status.to_db_str().to_string(),
            ));
        }

        let tx = conn.transaction()?;

        leave::update_decision(
            &tx,
            leave_id,
            LeaveStatus::Approved,
            caller.user_id,
            now,
            comments,
        )?;

        for day in days_inclusive(req.start_date, req.end_date) {
            attendance::set_day_status(&tx, req.employee_id, day, AttendanceStatus::Leave)?;
        }

        audit::record(
            &tx,
            "leave_approved",
            &leave_id.to_string(),
            &format!(
                "Leave approved for employee {} ({} to {})",
                req.employee_id, req.start_date, req.end_date
            ),
        )?;

        tx.commit()?;

        leave::require(conn, leave_id)
    }

    /// Reject: decision fields only, no attendance side effects.
    pub fn reject(
        conn: &mut Connection,
        caller: &Caller,
        leave_id: i64,
        now: NaiveDateTime,
        comments: &str,
    ) -> AppResult<LeaveRequest> {
        policy::authorize(caller, Action::DecideLeave, None)?;

        let req = leave::require(conn, leave_id)?;
        if req.status.is_terminal() {
            return Err(AppError::LeaveAlreadyDecided(
                req.status.to_db_str().to_string(),
            ));
        }

        let tx = conn.transaction()?;

        leave::update_decision(
            &tx,
            leave_id,
            LeaveStatus::Rejected,
            caller.user_id,
            now,
            comments,
        )?;

        audit::record(
            &tx,
            "leave_rejected",
            &leave_id.to_string(),
            &format!("Leave rejected for employee {}", req.employee_id),
        )?;

        tx.commit()?;

        leave::require(conn, leave_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::models::user::Role;

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_db(&conn).expect("init schema");

        conn.execute(
            "INSERT INTO companies (name, code, created_at) VALUES ('Acme', 'AC', datetime('now'))",
            [],
        )
        .unwrap();
        // id 1: hr approver, id 2: employee
        conn.execute(
            "INSERT INTO users (login_id, email, password_hash, first_name, last_name,
                                role, company_id, created_at)
             VALUES ('ACHRAA20240001', 'hr@acme.com', 'h', 'Hanna', 'Raab',
                     'hr', 1, datetime('now')),
                    ('ACJODO20240001', 'j@acme.com', 'h', 'John', 'Doe',
                     'employee', 1, datetime('now'))",
            [],
        )
        .unwrap();
        conn
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn employee() -> Caller {
        Caller {
            user_id: 2,
            role: Role::Employee,
            company_id: 1,
        }
    }

    fn hr() -> Caller {
        Caller {
            user_id: 1,
            role: Role::Hr,
            company_id: 1,
        }
    }

    fn submit(conn: &Connection, start: &str, end: &str) -> i64 {
        LeaveLogic::apply(
            conn,
            &employee(),
            LeaveType::Paid,
            d(start),
            d(end),
            LeaveDuration::FullDay,
            "trip",
            d("2024-06-01"),
        )
        .unwrap()
    }

    fn leave_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM leave_requests", [], |r| r.get(0))
            .unwrap()
    }

    fn day_status(conn: &Connection, date: &str) -> Option<String> {
        conn.query_row(
            "SELECT status FROM attendance WHERE employee_id = 2 AND date = ?1",
            [date],
            |r| r.get(0),
        )
        .ok()
    }

    #[test]
    fn inverted_range_fails_and_persists_nothing() {
        let conn = mem_db();
        let err = LeaveLogic::apply(
            &conn,
            &employee(),
            LeaveType::Paid,
            d("2024-06-20"),
            d("2024-06-10"),
            LeaveDuration::FullDay,
            "",
            d("2024-06-01"),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidRange { .. }));
        assert_eq!(leave_count(&conn), 0);
    }

    #[test]
    fn past_start_date_fails() {
        let conn = mem_db();
        let err = LeaveLogic::apply(
            &conn,
            &employee(),
            LeaveType::Sick,
            d("2024-05-20"),
            d("2024-05-21"),
            LeaveDuration::FullDay,
            "",
            d("2024-06-01"),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::PastDate(_)));
        assert_eq!(leave_count(&conn), 0);
    }

    #[test]
    fn approval_backfills_every_day_inclusive() {
        let mut conn = mem_db();
        let id = submit(&conn, "2024-06-10", "2024-06-12");

        let req =
            LeaveLogic::approve(&mut conn, &hr(), id, d("2024-06-05").and_hms_opt(9, 0, 0).unwrap(), "ok")
                .unwrap();

        assert_eq!(req.status, LeaveStatus::Approved);
        assert_eq!(req.approved_by, Some(1));
        for date in ["2024-06-10", "2024-06-11", "2024-06-12"] {
            assert_eq!(day_status(&conn, date).as_deref(), Some("leave"));
        }
    }

    #[test]
    fn approval_overwrites_an_existing_present_day() {
        let mut conn = mem_db();

        conn.execute(
            "INSERT INTO attendance (employee_id, date, check_in, status, hours_worked, created_at)
             VALUES (2, '2024-06-11', '2024-06-11 09:00:00', 'present', 0.0, datetime('now'))",
            [],
        )
        .unwrap();

        let id = submit(&conn, "2024-06-10", "2024-06-12");
        LeaveLogic::approve(&mut conn, &hr(), id, d("2024-06-05").and_hms_opt(9, 0, 0).unwrap(), "")
            .unwrap();

        assert_eq!(day_status(&conn, "2024-06-11").as_deref(), Some("leave"));

        // one row per day, the present row was reused not duplicated
        let rows: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM attendance WHERE employee_id = 2 AND date = '2024-06-11'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn rejection_touches_no_attendance_rows() {
        let mut conn = mem_db();
        let id = submit(&conn, "2024-06-10", "2024-06-12");

        let req =
            LeaveLogic::reject(&mut conn, &hr(), id, d("2024-06-05").and_hms_opt(9, 0, 0).unwrap(), "no")
                .unwrap();

        assert_eq!(req.status, LeaveStatus::Rejected);
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn deciding_twice_fails() {
        let mut conn = mem_db();
        let id = submit(&conn, "2024-06-10", "2024-06-10");
        let at = d("2024-06-05").and_hms_opt(9, 0, 0).unwrap();

        LeaveLogic::approve(&mut conn, &hr(), id, at, "").unwrap();
        let err = LeaveLogic::reject(&mut conn, &hr(), id, at, "").unwrap_err();
        assert!(matches!(err, AppError::LeaveAlreadyDecided(_)));
    }

    #[test]
    fn employees_cannot_decide() {
        let mut conn = mem_db();
        let id = submit(&conn, "2024-06-10", "2024-06-10");
        let at = d("2024-06-05").and_hms_opt(9, 0, 0).unwrap();

        let err = LeaveLogic::approve(&mut conn, &employee(), id, at, "").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
