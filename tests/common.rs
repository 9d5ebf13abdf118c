#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn dfl() -> Command {
    cargo_bin_cmd!("dayflow")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_dayflow.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    dfl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Register a user via the CLI and return the generated login id,
/// scraped from the command output.
pub fn register(
    db_path: &str,
    acting: Option<&str>,
    company: &str,
    first: &str,
    last: &str,
    email: &str,
    role: &str,
) -> String {
    let mut cmd = dfl();
    cmd.args(["--db", db_path]);
    if let Some(login) = acting {
        cmd.args(["--as", login]);
    }
    cmd.args([
        "register",
        "--company",
        company,
        "--first-name",
        first,
        "--last-name",
        last,
        "--email",
        email,
        "--role",
        role,
    ]);

    let output = cmd.output().expect("run register");
    assert!(
        output.status.success(),
        "register failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    extract_field(&stdout, "Login ID")
}

/// Pull `<value>` out of a `Label : <value>` output line.
pub fn extract_field(stdout: &str, label: &str) -> String {
    stdout
        .lines()
        .find(|l| l.contains(label))
        .and_then(|l| l.split(':').next_back())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| panic!("no '{}' line in output:\n{}", label, stdout))
}

/// init + bootstrap admin. Returns the admin's login id.
pub fn init_with_admin(db_path: &str) -> String {
    init_db(db_path);
    register(
        db_path,
        None,
        "Acme Corp",
        "Ada",
        "Admin",
        "ada@acme.com",
        "employee", // ignored: the bootstrap registration is forced to admin
    )
}

/// init + admin + one regular employee. Returns (admin, employee) login ids.
pub fn init_with_employee(db_path: &str) -> (String, String) {
    let admin = init_with_admin(db_path);
    let employee = register(
        db_path,
        Some(&admin),
        "Acme Corp",
        "John",
        "Doe",
        "john@acme.com",
        "employee",
    );
    (admin, employee)
}
