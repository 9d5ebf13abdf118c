//! Payroll operations: salary upsert and company-wide bulk updates.
//! Gross/deductions/net arithmetic lives on `SalaryInfo` itself.

use crate::core::policy::{self, Action};
use crate::db::{audit, payroll};
use crate::errors::AppResult;
use crate::models::salary::SalaryInfo;
use crate::models::user::Caller;
use rusqlite::Connection;

pub struct PayrollLogic;

impl PayrollLogic {
    /// Admin/HR upsert of every salary component for one employee.
    pub fn set_salary(conn: &Connection, caller: &Caller, salary: &SalaryInfo) -> AppResult<()> {
        policy::authorize(caller, Action::EditSalary, Some(salary.employee_id))?;
        payroll::upsert(conn, salary)?;
        audit::record(
            conn,
            "salary_updated",
            &salary.employee_id.to_string(),
            "Salary components updated",
        )?;
        Ok(())
    }

    /// Salary for viewing: the caller's own, or anyone's for staff.
    pub fn salary_of(conn: &Connection, caller: &Caller, employee_id: i64) -> AppResult<SalaryInfo> {
        policy::authorize(caller, Action::ViewSalary, Some(employee_id))?;
        payroll::get_or_default(conn, employee_id)
    }

    /// Percentage increment on basic salary for every employee of the
    /// caller's company that has salary configured. Increments compound:
    /// applying 10% twice yields 21% total. Returns the updated count;
    /// employees without salary info are silently skipped.
    pub fn bulk_increment(conn: &mut Connection, caller: &Caller, percent: f64) -> AppResult<usize> {
        policy::authorize(caller, Action::BulkPayroll, None)?;

        let tx = conn.transaction()?;
        let updated = payroll::apply_increment(&tx, caller.company_id, percent)?;
        audit::record(
            &tx,
            "bulk_increment",
            &caller.company_id.to_string(),
            &format!("Applied {percent}% increment to {updated} employees"),
        )?;
        tx.commit()?;

        Ok(updated)
    }

    /// Flat bonus added to performance_bonus, same selection and skip
    /// policy as the increment.
    pub fn bulk_bonus(conn: &mut Connection, caller: &Caller, amount: f64) -> AppResult<usize> {
        policy::authorize(caller, Action::BulkPayroll, None)?;

        let tx = conn.transaction()?;
        let updated = payroll::apply_bonus(&tx, caller.company_id, amount)?;
        audit::record(
            &tx,
            "bulk_bonus",
            &caller.company_id.to_string(),
            &format!("Applied bonus of {amount:.2} to {updated} employees"),
        )?;
        tx.commit()?;

        Ok(updated)
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
        conn.execute(
            "INSERT INTO users (login_id, email, password_hash, first_name, last_name,
                                role, company_id, created_at)
             VALUES ('ACADAA20240001', 'a@acme.com', 'h', 'Ada', 'Admin',
                     'admin', 1, datetime('now')),
                    ('ACJODO20240001', 'j@acme.com', 'h', 'John', 'Doe',
                     'employee', 1, datetime('now')),
                    ('ACMARO20240001', 'm@acme.com', 'h', 'Mary', 'Roe',
                     'employee', 1, datetime('now'))",
            [],
        )
        .unwrap();
        conn
    }

    fn admin() -> Caller {
        Caller {
            user_id: 1,
            role: Role::Admin,
            company_id: 1,
        }
    }

    fn set_basic(conn: &Connection, employee_id: i64, basic: f64) {
        let mut s = SalaryInfo::default_for(employee_id);
        s.basic_salary = basic;
        PayrollLogic::set_salary(conn, &admin(), &s).unwrap();
    }

    fn basic_of(conn: &Connection, employee_id: i64) -> f64 {
        conn.query_row(
            "SELECT basic_salary FROM salary_info WHERE employee_id = ?1",
            [employee_id],
            |r| r.get(0),
        )
        .unwrap()
    }

    #[test]
    fn increment_compounds_across_applications() {
        let mut conn = mem_db();
        set_basic(&conn, 2, 1000.0);

        let n = PayrollLogic::bulk_increment(&mut conn, &admin(), 10.0).unwrap();
        assert_eq!(n, 1);
        assert!((basic_of(&conn, 2) - 1100.0).abs() < 1e-9);

        PayrollLogic::bulk_increment(&mut conn, &admin(), 10.0).unwrap();
        assert!((basic_of(&conn, 2) - 1210.0).abs() < 1e-9);
    }

    #[test]
    fn employees_without_salary_are_skipped_silently() {
        let mut conn = mem_db();
        set_basic(&conn, 2, 1000.0);
        // user 3 has no salary_info row

        let n = PayrollLogic::bulk_increment(&mut conn, &admin(), 5.0).unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn bonus_adds_to_performance_bonus() {
        let mut conn = mem_db();
        set_basic(&conn, 2, 1000.0);
        set_basic(&conn, 3, 2000.0);

        let n = PayrollLogic::bulk_bonus(&mut conn, &admin(), 500.0).unwrap();
        assert_eq!(n, 2);

        let bonus: f64 = conn
            .query_row(
                "SELECT performance_bonus FROM salary_info WHERE employee_id = 2",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(bonus, 500.0);
    }

    #[test]
    fn bulk_requires_staff() {
        let mut conn = mem_db();
        let emp = Caller {
            user_id: 2,
            role: Role::Employee,
            company_id: 1,
        };
        assert!(PayrollLogic::bulk_increment(&mut conn, &emp, 10.0).is_err());
    }
}
