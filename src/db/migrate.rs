use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure the audit `log` table exists; everything else depends on it for
/// migration markers.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the full schema. Every statement is idempotent, so this runs on
/// both fresh and existing databases.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            code       TEXT NOT NULL UNIQUE,
            logo       TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            login_id             TEXT NOT NULL UNIQUE,
            email                TEXT NOT NULL UNIQUE,
            password_hash        TEXT NOT NULL,
            first_name           TEXT NOT NULL,
            last_name            TEXT NOT NULL,
            phone                TEXT,
            role                 TEXT NOT NULL DEFAULT 'employee'
                                 CHECK(role IN ('admin','hr','employee')),
            department           TEXT,
            position             TEXT,
            manager_id           INTEGER REFERENCES users(id),
            company_id           INTEGER NOT NULL REFERENCES companies(id),
            profile_picture      TEXT,
            date_joined          TEXT,
            is_active            INTEGER NOT NULL DEFAULT 1,
            must_change_password INTEGER NOT NULL DEFAULT 1,
            created_at           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_company ON users(company_id);
        CREATE INDEX IF NOT EXISTS idx_users_login_prefix ON users(login_id);

        CREATE TABLE IF NOT EXISTS profile_details (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id             INTEGER NOT NULL UNIQUE REFERENCES users(id),
            date_of_birth       TEXT,
            residential_address TEXT,
            nationality         TEXT,
            personal_email      TEXT,
            gender              TEXT,
            marital_status      TEXT,
            account_number      TEXT,
            bank_name           TEXT,
            ifsc_code           TEXT,
            pan_number          TEXT,
            uan_number          TEXT,
            employee_code       TEXT,
            created_at          TEXT NOT NULL,
            updated_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_skills (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL REFERENCES users(id),
            skill_name        TEXT NOT NULL,
            proficiency_level TEXT,
            created_at        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_certifications (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id              INTEGER NOT NULL REFERENCES users(id),
            certification_name   TEXT NOT NULL,
            issuing_organization TEXT,
            issue_date           TEXT,
            expiry_date          TEXT,
            credential_id        TEXT,
            created_at           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES users(id),
            date         TEXT NOT NULL,
            check_in     TEXT,
            check_out    TEXT,
            status       TEXT NOT NULL DEFAULT 'absent'
                         CHECK(status IN ('present','absent','half_day','leave')),
            hours_worked REAL NOT NULL DEFAULT 0.0,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);

        CREATE TABLE IF NOT EXISTS leave_requests (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    INTEGER NOT NULL REFERENCES users(id),
            leave_type     TEXT NOT NULL CHECK(leave_type IN ('paid','sick','unpaid')),
            start_date     TEXT NOT NULL,
            end_date       TEXT NOT NULL,
            duration       TEXT NOT NULL CHECK(duration IN ('full_day','half_day')),
            reason         TEXT NOT NULL DEFAULT '',
            status         TEXT NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending','approved','rejected')),
            approved_by    INTEGER REFERENCES users(id),
            approved_at    TEXT,
            admin_comments TEXT,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_leave_employee ON leave_requests(employee_id, status);
        CREATE INDEX IF NOT EXISTS idx_leave_dates ON leave_requests(start_date, end_date);

        CREATE TABLE IF NOT EXISTS salary_info (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id        INTEGER NOT NULL UNIQUE REFERENCES users(id),
            basic_salary       REAL NOT NULL DEFAULT 0.0,
            hra                REAL NOT NULL DEFAULT 0.0,
            standard_allowance REAL NOT NULL DEFAULT 0.0,
            performance_bonus  REAL NOT NULL DEFAULT 0.0,
            lta                REAL NOT NULL DEFAULT 0.0,
            fixed_allowance    REAL NOT NULL DEFAULT 0.0,
            pf_employee        REAL NOT NULL DEFAULT 0.0,
            pf_employer        REAL NOT NULL DEFAULT 0.0,
            professional_tax   REAL NOT NULL DEFAULT 0.0,
            created_at         TEXT NOT NULL,
            updated_at         TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// One attendance row per (employee, date). Added as a marked migration so
/// databases created before the constraint pick it up exactly once.
fn migrate_attendance_unique_index(conn: &Connection) -> Result<()> {
    let version = "20250412_0001_attendance_unique_day";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_employee_day
            ON attendance(employee_id, date);
        "#,
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1,
                 'Unique index on attendance(employee_id, date)')",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_schema(conn)?;
    migrate_attendance_unique_index(conn)?;
    Ok(())
}
