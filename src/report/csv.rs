//! CSV export. Machine-oriented: 24-hour times, bare numbers, raw status
//! codes, empty cells for missing values. Filenames encode the range so
//! repeated exports sort naturally.

use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::report::range::ReportRange;
use crate::report::rows::{AttendanceRow, LeaveBalanceRow, PayrollTotals, SalarySlipRow};
use crate::utils::formatting::hours_cell;
use chrono::{NaiveDate, NaiveDateTime};

const TIME_FMT: &str = "%H:%M:%S";

fn time_cell(t: Option<NaiveDateTime>) -> String {
    t.map(|t| t.format(TIME_FMT).to_string()).unwrap_or_default()
}

fn writer() -> csv::Writer<Vec<u8>> {
    csv::Writer::from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

fn attendance_filename(range: ReportRange, today: NaiveDate) -> String {
    match range {
        ReportRange::Daily => format!("daily_attendance_{}.csv", today.format("%Y%m%d")),
        ReportRange::Weekly => {
            let (start, _) = range.resolve(today);
            format!(
                "weekly_attendance_{}_to_{}.csv",
                start.format("%Y%m%d"),
                today.format("%Y%m%d")
            )
        }
        ReportRange::Monthly => format!("monthly_attendance_{}.csv", today.format("%Y%m")),
        ReportRange::Custom { start, end } => format!(
            "custom_attendance_{}_to_{}.csv",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
    }
}

pub fn attendance_csv(
    range: ReportRange,
    today: NaiveDate,
    rows: &[AttendanceRow],
) -> AppResult<(String, String)> {
    let mut wtr = writer();
    wtr.write_record([
        "Employee ID",
        "Employee Name",
        "Date",
        "Check In",
        "Check Out",
        "Hours Worked",
        "Status",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        wtr.write_record([
            row.login_id.as_str(),
            row.employee_name.as_str(),
            &row.date.format("%Y-%m-%d").to_string(),
            &time_cell(row.check_in),
            &time_cell(row.check_out),
            &hours_cell(row.hours_worked, "0"),
            row.status.to_db_str(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    Ok((attendance_filename(range, today), finish(wtr)?))
}

pub fn salary_slips_csv(today: NaiveDate, rows: &[SalarySlipRow]) -> AppResult<(String, String)> {
    let mut wtr = writer();
    wtr.write_record([
        "Employee ID",
        "Employee Name",
        "Department",
        "Basic Salary",
        "HRA",
        "Standard Allowance",
        "Performance Bonus",
        "LTA",
        "Fixed Allowance",
        "Gross Salary",
        "PF Employee",
        "Professional Tax",
        "Total Deductions",
        "Net Salary",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        let s = &row.salary;
        wtr.write_record([
            row.login_id.as_str(),
            row.employee_name.as_str(),
            row.department.as_deref().unwrap_or("Not Assigned"),
            &s.basic_salary.to_string(),
            &s.hra.to_string(),
            &s.standard_allowance.to_string(),
            &s.performance_bonus.to_string(),
            &s.lta.to_string(),
            &s.fixed_allowance.to_string(),
            &s.gross().to_string(),
            &s.pf_employee.to_string(),
            &s.professional_tax.to_string(),
            &s.deductions().to_string(),
            &s.net().to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    Ok((
        format!("salary_slips_{}.csv", today.format("%Y%m")),
        finish(wtr)?,
    ))
}

/// Metric/value pairs rather than one wide row.
pub fn payroll_summary_csv(today: NaiveDate, totals: &PayrollTotals) -> AppResult<(String, String)> {
    let mut wtr = writer();
    let pairs = [
        ("Metric", "Value".to_string()),
        ("Total Employees", totals.employees.to_string()),
        ("Total Basic Salary", totals.basic.to_string()),
        ("Total Gross Salary", totals.gross.to_string()),
        ("Total Deductions", totals.deductions.to_string()),
        ("Total Net Salary", totals.net.to_string()),
    ];
    for (metric, value) in pairs {
        wtr.write_record([metric, value.as_str()])
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    Ok((
        format!("payroll_summary_{}.csv", today.format("%Y%m")),
        finish(wtr)?,
    ))
}

pub fn leave_balance_csv(today: NaiveDate, rows: &[LeaveBalanceRow]) -> AppResult<(String, String)> {
    let mut wtr = writer();
    wtr.write_record([
        "Employee ID",
        "Employee Name",
        "Department",
        "Paid Leave Quota",
        "Sick Leave Quota",
        "Used This Year",
        "Remaining Balance",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        wtr.write_record([
            row.login_id.as_str(),
            row.employee_name.as_str(),
            row.department.as_deref().unwrap_or("Not Assigned"),
            &row.paid_quota.to_string(),
            &row.sick_quota.to_string(),
            &row.used_this_year.to_string(),
            &row.remaining.to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    Ok((
        format!("leave_balance_{}.csv", today.format("%Y%m%d")),
        finish(wtr)?,
    ))
}

pub fn directory_csv(today: NaiveDate, users: &[User]) -> AppResult<(String, String)> {
    let mut wtr = writer();
    wtr.write_record([
        "Employee ID",
        "First Name",
        "Last Name",
        "Email",
        "Phone",
        "Department",
        "Position",
        "Role",
        "Date Joined",
        "Status",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for user in users {
        wtr.write_record([
            user.login_id.as_str(),
            user.first_name.as_str(),
            user.last_name.as_str(),
            user.email.as_str(),
            user.phone.as_deref().unwrap_or(""),
            user.department.as_deref().unwrap_or(""),
            user.position.as_deref().unwrap_or(""),
            user.role.to_db_str(),
            &user
                .date_joined
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            if user.is_active { "Active" } else { "Inactive" },
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    Ok((
        format!("employee_directory_{}.csv", today.format("%Y%m%d")),
        finish(wtr)?,
    ))
}
