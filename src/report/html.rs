//! HTML fragment rendering. Times are 12-hour, money carries the currency
//! symbol with thousands separators, missing values show `-`.

use crate::models::attendance::AttendanceStatus;
use crate::models::user::{Role, User};
use crate::report::range::ReportRange;
use crate::report::rows::{AttendanceRow, LeaveBalanceRow, PayrollTotals, SalarySlipRow};
use crate::utils::format_currency;
use crate::utils::formatting::hours_cell;
use chrono::{NaiveDate, NaiveDateTime};

const TIME_FMT: &str = "%I:%M %p";

fn time_cell(t: Option<NaiveDateTime>) -> String {
    t.map(|t| t.format(TIME_FMT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn status_badge(status: AttendanceStatus) -> String {
    let class = match status {
        AttendanceStatus::Present => "success",
        AttendanceStatus::Leave => "info",
        AttendanceStatus::HalfDay => "warning",
        AttendanceStatus::Absent => "danger",
    };
    format!(
        "<span class=\"badge bg-{}\">{}</span>",
        class,
        status.label()
    )
}

fn role_badge(role: Role) -> String {
    let class = match role {
        Role::Admin => "success",
        Role::Hr => "info",
        Role::Employee => "secondary",
    };
    format!("<span class=\"badge bg-{}\">{}</span>", class, role.label())
}

fn open_table(title: &str, headers: &[&str]) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"report-content\">\n");
    html.push_str(&format!("<h4>{}</h4>\n", title));
    html.push_str("<div class=\"table-responsive\">\n");
    html.push_str("<table class=\"table table-striped\">\n<thead>\n<tr>");
    for h in headers {
        html.push_str(&format!("<th>{}</th>", h));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    html
}

fn close_table(mut html: String) -> String {
    html.push_str("</tbody>\n</table>\n</div>\n</div>\n");
    html
}

fn attendance_title(range: ReportRange, today: NaiveDate) -> String {
    match range {
        ReportRange::Daily => format!(
            "Daily Attendance Report - {}",
            today.format("%B %d, %Y")
        ),
        ReportRange::Weekly => {
            let (start, _) = range.resolve(today);
            format!(
                "Weekly Attendance Report - {} to {}",
                start.format("%B %d"),
                today.format("%B %d, %Y")
            )
        }
        ReportRange::Monthly => format!(
            "Monthly Attendance Report - {}",
            today.format("%B %Y")
        ),
        ReportRange::Custom { start, end } => format!(
            "Custom Attendance Report ({} to {})",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
    }
}

pub fn attendance_table(range: ReportRange, today: NaiveDate, rows: &[AttendanceRow]) -> String {
    let mut html = open_table(
        &attendance_title(range, today),
        &["Employee", "Date", "Check In", "Check Out", "Hours", "Status"],
    );

    if rows.is_empty() {
        html.push_str(
            "<tr><td colspan=\"6\" class=\"text-center text-muted\">No attendance records found</td></tr>\n",
        );
    } else {
        for row in rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                row.employee_name,
                row.date.format("%Y-%m-%d"),
                time_cell(row.check_in),
                time_cell(row.check_out),
                hours_cell(row.hours_worked, "-"),
                status_badge(row.status),
            ));
        }
    }

    close_table(html)
}

pub fn salary_slips_table(rows: &[SalarySlipRow], symbol: &str) -> String {
    let mut html = open_table(
        "Individual Salary Slips",
        &[
            "Employee",
            "Basic Salary",
            "HRA",
            "Allowances",
            "Gross Salary",
            "Deductions",
            "Net Salary",
        ],
    );

    for row in rows {
        let s = &row.salary;
        let allowances =
            s.standard_allowance + s.performance_bonus + s.lta + s.fixed_allowance;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><strong>{}</strong></td></tr>\n",
            row.employee_name,
            format_currency(s.basic_salary, symbol),
            format_currency(s.hra, symbol),
            format_currency(allowances, symbol),
            format_currency(s.gross(), symbol),
            format_currency(s.deductions(), symbol),
            format_currency(s.net(), symbol),
        ));
    }

    close_table(html)
}

pub fn payroll_summary_cards(totals: &PayrollTotals, symbol: &str) -> String {
    let card = |class: &str, value: String, label: &str| {
        format!(
            "<div class=\"col-md-3\"><div class=\"card bg-{} text-white\">\
             <div class=\"card-body text-center\"><h3>{}</h3>\
             <p class=\"mb-0\">{}</p></div></div></div>\n",
            class, value, label
        )
    };

    let mut html = String::new();
    html.push_str("<div class=\"report-content\">\n<h4>Payroll Summary Report</h4>\n");
    html.push_str("<div class=\"row mb-4\">\n");
    html.push_str(&card("primary", totals.employees.to_string(), "Employees"));
    html.push_str(&card(
        "info",
        format_currency(totals.basic, symbol),
        "Total Basic",
    ));
    html.push_str(&card(
        "success",
        format_currency(totals.gross, symbol),
        "Total Gross",
    ));
    html.push_str(&card(
        "warning",
        format_currency(totals.net, symbol),
        "Total Net",
    ));
    html.push_str("</div>\n</div>\n");
    html
}

pub fn leave_balance_table(rows: &[LeaveBalanceRow]) -> String {
    let mut html = open_table(
        "Leave Balance Report",
        &[
            "Employee",
            "Department",
            "Paid Leave",
            "Sick Leave",
            "Used This Year",
            "Remaining",
        ],
    );

    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.employee_name,
            row.department.as_deref().unwrap_or("Not Assigned"),
            row.paid_quota,
            row.sick_quota,
            row.used_this_year,
            row.remaining,
        ));
    }

    close_table(html)
}

pub fn directory_table(users: &[User]) -> String {
    let mut html = open_table(
        "Employee Directory Report",
        &[
            "Employee ID",
            "Name",
            "Email",
            "Phone",
            "Department",
            "Position",
            "Role",
            "Date Joined",
        ],
    );

    for user in users {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            user.login_id,
            user.full_name(),
            user.email,
            user.phone.as_deref().unwrap_or("Not Provided"),
            user.department.as_deref().unwrap_or("Not Assigned"),
            user.position.as_deref().unwrap_or("Not Assigned"),
            role_badge(user.role),
            user.date_joined
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Not Available".to_string()),
        ));
    }

    close_table(html)
}

pub fn unsupported_alert(report_type: &str, subtype: &str) -> String {
    format!(
        "<div class=\"alert alert-warning\">Unsupported report: {} / {}</div>\n",
        report_type, subtype
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;
    use crate::utils::date::parse_date;

    fn row(hours: f64) -> AttendanceRow {
        AttendanceRow {
            login_id: "ACJODO20240001".to_string(),
            employee_name: "John Doe".to_string(),
            date: parse_date("2024-06-10").unwrap(),
            check_in: Some(
                parse_date("2024-06-10")
                    .unwrap()
                    .and_hms_opt(14, 30, 0)
                    .unwrap(),
            ),
            check_out: None,
            hours_worked: hours,
            status: AttendanceStatus::Present,
        }
    }

    #[test]
    fn attendance_uses_twelve_hour_clock_and_dash() {
        let html = attendance_table(
            ReportRange::Daily,
            parse_date("2024-06-10").unwrap(),
            &[row(0.0)],
        );
        assert!(html.contains("02:30 PM"));
        assert!(html.contains("<td>-</td>")); // missing check_out and zero hours
        assert!(html.contains("badge bg-success"));
    }

    #[test]
    fn empty_attendance_renders_placeholder_row() {
        let html = attendance_table(ReportRange::Daily, parse_date("2024-06-10").unwrap(), &[]);
        assert!(html.contains("No attendance records found"));
    }

    #[test]
    fn weekly_title_spans_the_range() {
        let html = attendance_table(
            ReportRange::Weekly,
            parse_date("2024-06-12").unwrap(),
            &[],
        );
        assert!(html.contains("Weekly Attendance Report - June 10 to June 12, 2024"));
    }

    #[test]
    fn half_day_status_label_has_a_space() {
        let mut r = row(4.0);
        r.status = AttendanceStatus::HalfDay;
        let html = attendance_table(ReportRange::Daily, parse_date("2024-06-10").unwrap(), &[r]);
        assert!(html.contains(">Half Day</span>"));
        assert!(html.contains("badge bg-warning"));
    }
}
