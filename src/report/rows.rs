//! Shared row selection. Both renderers consume these structs, so the
//! column values of the HTML view and the CSV export always come from the
//! same queries.

use crate::db::{attendance, identity, leave, payroll};
use crate::errors::AppResult;
use crate::models::attendance::AttendanceStatus;
use crate::models::leave::{PAID_LEAVE_QUOTA, SICK_LEAVE_QUOTA, TOTAL_LEAVE_QUOTA};
use crate::models::salary::SalaryInfo;
use crate::models::user::User;
use crate::utils::date::year_start;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::collections::HashMap;

#[derive(Debug)]
pub struct AttendanceRow {
    pub login_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    pub hours_worked: f64,
    pub status: AttendanceStatus,
}

/// Company ledger rows in [start, end] joined with employee identity.
pub fn attendance_rows(
    conn: &Connection,
    company_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<AttendanceRow>> {
    let users = identity::list_company_users(conn, company_id)?;
    let by_id: HashMap<i64, &User> = users.iter().map(|u| (u.id, u)).collect();

    let mut out = Vec::new();
    for att in attendance::list_company_range(conn, company_id, start, end)? {
        if let Some(user) = by_id.get(&att.employee_id) {
            out.push(AttendanceRow {
                login_id: user.login_id.clone(),
                employee_name: user.full_name(),
                date: att.date,
                check_in: att.check_in,
                check_out: att.check_out,
                hours_worked: att.hours_worked,
                status: att.status,
            });
        }
    }
    Ok(out)
}

#[derive(Debug)]
pub struct SalarySlipRow {
    pub login_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub salary: SalaryInfo,
}

/// One slip per employee with salary configured; the rest are skipped.
pub fn salary_slip_rows(conn: &Connection, company_id: i64) -> AppResult<Vec<SalarySlipRow>> {
    let users = identity::list_company_users(conn, company_id)?;
    let by_id: HashMap<i64, &User> = users.iter().map(|u| (u.id, u)).collect();

    let mut out = Vec::new();
    for (employee_id, salary) in payroll::list_company_salaries(conn, company_id)? {
        if let Some(user) = by_id.get(&employee_id) {
            out.push(SalarySlipRow {
                login_id: user.login_id.clone(),
                employee_name: user.full_name(),
                department: user.department.clone(),
                salary,
            });
        }
    }
    Ok(out)
}

#[derive(Debug)]
pub struct PayrollTotals {
    pub employees: usize,
    pub basic: f64,
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
}

pub fn payroll_totals(rows: &[SalarySlipRow]) -> PayrollTotals {
    let gross: f64 = rows.iter().map(|r| r.salary.gross()).sum();
    let deductions: f64 = rows.iter().map(|r| r.salary.deductions()).sum();
    PayrollTotals {
        employees: rows.len(),
        basic: rows.iter().map(|r| r.salary.basic_salary).sum(),
        gross,
        deductions,
        net: gross - deductions,
    }
}

#[derive(Debug)]
pub struct LeaveBalanceRow {
    pub login_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub paid_quota: i64,
    pub sick_quota: i64,
    pub used_this_year: i64,
    pub remaining: i64,
}

/// Per-employee quota usage: approved requests whose start date falls in
/// the calendar year of `today`, counted as requests, not days.
pub fn leave_balance_rows(
    conn: &Connection,
    company_id: i64,
    today: NaiveDate,
) -> AppResult<Vec<LeaveBalanceRow>> {
    let jan_first = year_start(today);

    let mut out = Vec::new();
    for user in identity::list_company_users(conn, company_id)? {
        let used = leave::count_approved_since(conn, user.id, jan_first)?;
        out.push(LeaveBalanceRow {
            login_id: user.login_id.clone(),
            employee_name: user.full_name(),
            department: user.department.clone(),
            paid_quota: PAID_LEAVE_QUOTA,
            sick_quota: SICK_LEAVE_QUOTA,
            used_this_year: used,
            remaining: TOTAL_LEAVE_QUOTA - used,
        });
    }
    Ok(out)
}

/// The directory report is the plain user list; no derived columns.
pub fn directory_rows(conn: &Connection, company_id: i64) -> AppResult<Vec<User>> {
    identity::list_company_users(conn, company_id)
}
