use predicates::str::contains;

mod common;
use common::{dfl, init_with_employee, setup_test_db};

fn set_salary(db_path: &str, admin: &str, employee: &str, basic: &str) {
    dfl()
        .args([
            "--db", db_path, "--as", admin, "salary", "set", employee, "--basic", basic,
            "--pf-employee", "1800", "--professional-tax", "200",
        ])
        .assert()
        .success();
}

fn basic_of(db_path: &str, login: &str) -> f64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT s.basic_salary FROM salary_info s
         JOIN users u ON u.id = s.employee_id
         WHERE u.login_id = ?1",
        [login],
        |r| r.get(0),
    )
    .unwrap()
}

#[test]
fn test_salary_show_reports_net() {
    let db_path = setup_test_db("salary_show_net");
    let (admin, employee) = init_with_employee(&db_path);

    set_salary(&db_path, &admin, &employee, "50000");

    // 50000 - 1800 - 200 = 48000
    dfl()
        .args(["--db", &db_path, "--as", &employee, "salary", "show"])
        .assert()
        .success()
        .stdout(contains("₹48,000.00"));
}

#[test]
fn test_employees_cannot_view_others_salary() {
    let db_path = setup_test_db("salary_peek_denied");
    let (admin, employee) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db", &db_path, "--as", &employee, "salary", "show", &admin,
        ])
        .assert()
        .failure()
        .stderr(contains("Unauthorized"));
}

#[test]
fn test_employees_cannot_set_salary() {
    let db_path = setup_test_db("salary_set_denied");
    let (_, employee) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db", &db_path, "--as", &employee, "salary", "set", &employee, "--basic", "90000",
        ])
        .assert()
        .failure()
        .stderr(contains("Unauthorized"));
}

#[test]
fn test_bulk_increment_compounds() {
    let db_path = setup_test_db("payroll_compound");
    let (admin, employee) = init_with_employee(&db_path);

    set_salary(&db_path, &admin, &employee, "1000");

    dfl()
        .args(["--db", &db_path, "--as", &admin, "payroll", "increment", "10"])
        .assert()
        .success()
        .stdout(contains("1 employee(s)"));
    assert!((basic_of(&db_path, &employee) - 1100.0).abs() < 1e-9);

    dfl()
        .args(["--db", &db_path, "--as", &admin, "payroll", "increment", "10"])
        .assert()
        .success();
    assert!((basic_of(&db_path, &employee) - 1210.0).abs() < 1e-9);
}

#[test]
fn test_bulk_bonus_skips_unconfigured_employees() {
    let db_path = setup_test_db("payroll_bonus_skip");
    let (admin, employee) = init_with_employee(&db_path);

    // only the employee has salary info; the admin is silently skipped
    set_salary(&db_path, &admin, &employee, "30000");

    dfl()
        .args(["--db", &db_path, "--as", &admin, "payroll", "bonus", "500"])
        .assert()
        .success()
        .stdout(contains("1 employee(s)"));
}

#[test]
fn test_bulk_payroll_is_staff_only() {
    let db_path = setup_test_db("payroll_staff_only");
    let (_, employee) = init_with_employee(&db_path);

    dfl()
        .args([
            "--db", &db_path, "--as", &employee, "payroll", "increment", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Unauthorized"));
}
