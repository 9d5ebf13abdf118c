//! Salary component storage. Derived figures (gross/net) live on the
//! model, never in the database.

use crate::errors::AppResult;
use crate::models::salary::SalaryInfo;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<SalaryInfo> {
    Ok(SalaryInfo {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        basic_salary: row.get("basic_salary")?,
        hra: row.get("hra")?,
        standard_allowance: row.get("standard_allowance")?,
        performance_bonus: row.get("performance_bonus")?,
        lta: row.get("lta")?,
        fixed_allowance: row.get("fixed_allowance")?,
        pf_employee: row.get("pf_employee")?,
        pf_employer: row.get("pf_employer")?,
        professional_tax: row.get("professional_tax")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_for_employee(conn: &Connection, employee_id: i64) -> AppResult<Option<SalaryInfo>> {
    let mut stmt = conn.prepare("SELECT * FROM salary_info WHERE employee_id = ?1")?;
    Ok(stmt.query_row([employee_id], map_row).optional()?)
}

/// Get-or-default accessor: employees without configured salary get a
/// zeroed record that is not persisted until first write.
pub fn get_or_default(conn: &Connection, employee_id: i64) -> AppResult<SalaryInfo> {
    Ok(find_for_employee(conn, employee_id)?
        .unwrap_or_else(|| SalaryInfo::default_for(employee_id)))
}

pub fn upsert(conn: &Connection, salary: &SalaryInfo) -> AppResult<()> {
    conn.execute(
        "INSERT INTO salary_info (employee_id, basic_salary, hra, standard_allowance,
                                  performance_bonus, lta, fixed_allowance,
                                  pf_employee, pf_employer, professional_tax,
                                  created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, datetime('now'), datetime('now'))
         ON CONFLICT(employee_id) DO UPDATE SET
             basic_salary = excluded.basic_salary,
             hra = excluded.hra,
             standard_allowance = excluded.standard_allowance,
             performance_bonus = excluded.performance_bonus,
             lta = excluded.lta,
             fixed_allowance = excluded.fixed_allowance,
             pf_employee = excluded.pf_employee,
             pf_employer = excluded.pf_employer,
             professional_tax = excluded.professional_tax,
             updated_at = datetime('now')",
        params![
            salary.employee_id,
            salary.basic_salary,
            salary.hra,
            salary.standard_allowance,
            salary.performance_bonus,
            salary.lta,
            salary.fixed_allowance,
            salary.pf_employee,
            salary.pf_employer,
            salary.professional_tax,
        ],
    )?;
    Ok(())
}

/// (employee, salary) pairs for everyone in the company who has salary
/// configured. The silent-skip policy of bulk operations and payroll
/// reports comes from this selection.
pub fn list_company_salaries(
    conn: &Connection,
    company_id: i64,
) -> AppResult<Vec<(i64, SalaryInfo)>> {
    let mut stmt = conn.prepare(
        "SELECT s.* FROM salary_info s
         JOIN users u ON u.id = s.employee_id
         WHERE u.company_id = ?1
         ORDER BY s.employee_id ASC",
    )?;

    let rows = stmt.query_map([company_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        let s = r?;
        out.push((s.employee_id, s));
    }
    Ok(out)
}

/// basic_salary *= (1 + percent/100) across the company. Returns the number
/// of updated rows; employees without salary info are not rows here, so the
/// skip policy is free.
pub fn apply_increment(conn: &Connection, company_id: i64, percent: f64) -> AppResult<usize> {
    let updated = conn.execute(
        "UPDATE salary_info
         SET basic_salary = basic_salary * (1.0 + ?1 / 100.0),
             updated_at = datetime('now')
         WHERE employee_id IN (SELECT id FROM users WHERE company_id = ?2)",
        params![percent, company_id],
    )?;
    Ok(updated)
}

/// performance_bonus += amount across the company.
pub fn apply_bonus(conn: &Connection, company_id: i64, amount: f64) -> AppResult<usize> {
    let updated = conn.execute(
        "UPDATE salary_info
         SET performance_bonus = performance_bonus + ?1,
             updated_at = datetime('now')
         WHERE employee_id IN (SELECT id FROM users WHERE company_id = ?2)",
        params![amount, company_id],
    )?;
    Ok(updated)
}
