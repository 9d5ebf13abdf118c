use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{dfl, init_with_employee, setup_test_db, temp_out};

#[test]
fn test_daily_attendance_csv_row_count_matches_ledger() {
    let db_path = setup_test_db("report_daily_csv");
    let (admin, employee) = init_with_employee(&db_path);

    dfl()
        .args(["--db", &db_path, "--as", &employee, "check-in"])
        .assert()
        .success();

    let out = temp_out("report_daily_csv", "csv");
    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "report", "--type", "attendance", "--subtype",
            "daily", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Employee ID,Employee Name,Date,Check In,Check Out,Hours Worked,Status"
    );
    assert_eq!(lines.count(), 1); // one check-in, one data row
    assert!(content.contains(&employee));
    assert!(content.contains("present"));
}

#[test]
fn test_weekly_view_prints_html_fragment() {
    let db_path = setup_test_db("report_weekly_view");
    let (admin, employee) = init_with_employee(&db_path);

    dfl()
        .args(["--db", &db_path, "--as", &employee, "check-in"])
        .assert()
        .success();

    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "report", "--type", "attendance", "--subtype",
            "weekly",
        ])
        .assert()
        .success()
        .stdout(contains("Weekly Attendance Report").and(contains("John Doe")));
}

#[test]
fn test_unsupported_subtype_exits_cleanly() {
    let db_path = setup_test_db("report_unsupported");
    let (admin, _) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "report", "--type", "attendance", "--subtype",
            "hourly",
        ])
        .assert()
        .success()
        .stdout(contains("Unsupported report"));
}

#[test]
fn test_custom_range_with_bad_dates_fails() {
    let db_path = setup_test_db("report_bad_range");
    let (admin, _) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db",
            &db_path,
            "--as",
            &admin,
            "report",
            "--type",
            "attendance",
            "--subtype",
            "custom",
            "--range",
            "10/06/2024:2024-06-12",
            "--format",
            "csv",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_employee_directory_csv_headers_and_rows() {
    let db_path = setup_test_db("report_directory_csv");
    let (admin, employee) = init_with_employee(&db_path);

    let out = temp_out("report_directory_csv", "csv");
    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "report", "--type", "employee", "--subtype",
            "directory", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with(
        "Employee ID,First Name,Last Name,Email,Phone,Department,Position,Role,Date Joined,Status"
    ));
    assert!(content.contains(&admin));
    assert!(content.contains(&employee));
    assert!(content.contains("Active"));
}

#[test]
fn test_leave_balance_csv_shows_quotas() {
    let db_path = setup_test_db("report_balance_csv");
    let (admin, _) = init_with_employee(&db_path);

    let out = temp_out("report_balance_csv", "csv");
    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "report", "--type", "leave", "--subtype", "balance",
            "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with(
        "Employee ID,Employee Name,Department,Paid Leave Quota,Sick Leave Quota,Used This Year,Remaining Balance"
    ));
    // nobody has approved leave yet
    assert!(content.contains("15,7,0,22"));
}

#[test]
fn test_payroll_summary_csv_totals() {
    let db_path = setup_test_db("report_summary_csv");
    let (admin, employee) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "salary", "set", &employee, "--basic", "50000",
            "--pf-employee", "1800", "--professional-tax", "200",
        ])
        .assert()
        .success();

    let out = temp_out("report_summary_csv", "csv");
    dfl()
        .args([
            "--db", &db_path, "--as", &admin, "report", "--type", "payroll", "--subtype",
            "summary", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("Metric,Value"));
    assert!(content.contains("Total Employees,1"));
    assert!(content.contains("Total Net Salary,48000"));
}

#[test]
fn test_reports_are_staff_only() {
    let db_path = setup_test_db("report_staff_only");
    let (_, employee) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db", &db_path, "--as", &employee, "report", "--type", "employee", "--subtype",
            "directory",
        ])
        .assert()
        .failure()
        .stderr(contains("Unauthorized"));
}
