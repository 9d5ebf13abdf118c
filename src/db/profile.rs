//! Profile details, skills and certifications.

use crate::errors::{AppError, AppResult};
use crate::models::profile::{ProfileDetails, UserCertification, UserSkill};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const DATE_FMT: &str = "%Y-%m-%d";

fn parse_opt_date(col: &'static str, s: Option<String>) -> Result<Option<NaiveDate>> {
    s.map(|s| {
        NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(format!("{col}: {s}"))),
            )
        })
    })
    .transpose()
}

fn fmt_opt_date(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format(DATE_FMT).to_string())
}

pub fn map_details_row(row: &Row) -> Result<ProfileDetails> {
    Ok(ProfileDetails {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date_of_birth: parse_opt_date("date_of_birth", row.get("date_of_birth")?)?,
        residential_address: row.get("residential_address")?,
        nationality: row.get("nationality")?,
        personal_email: row.get("personal_email")?,
        gender: row.get("gender")?,
        marital_status: row.get("marital_status")?,
        account_number: row.get("account_number")?,
        bank_name: row.get("bank_name")?,
        ifsc_code: row.get("ifsc_code")?,
        pan_number: row.get("pan_number")?,
        uan_number: row.get("uan_number")?,
        employee_code: row.get("employee_code")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_details(conn: &Connection, user_id: i64) -> AppResult<Option<ProfileDetails>> {
    let mut stmt = conn.prepare("SELECT * FROM profile_details WHERE user_id = ?1")?;
    Ok(stmt.query_row([user_id], map_details_row).optional()?)
}

/// Lazy accessor: a default in-memory record when nothing is stored yet.
/// Persistence happens on the first save, not here.
pub fn get_or_default_details(conn: &Connection, user_id: i64) -> AppResult<ProfileDetails> {
    Ok(find_details(conn, user_id)?.unwrap_or_else(|| ProfileDetails::default_for(user_id)))
}

pub fn save_details(conn: &Connection, details: &ProfileDetails) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profile_details (user_id, date_of_birth, residential_address,
                                      nationality, personal_email, gender, marital_status,
                                      account_number, bank_name, ifsc_code,
                                      pan_number, uan_number, employee_code,
                                      created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                 datetime('now'), datetime('now'))
         ON CONFLICT(user_id) DO UPDATE SET
             date_of_birth = excluded.date_of_birth,
             residential_address = excluded.residential_address,
             nationality = excluded.nationality,
             personal_email = excluded.personal_email,
             gender = excluded.gender,
             marital_status = excluded.marital_status,
             account_number = excluded.account_number,
             bank_name = excluded.bank_name,
             ifsc_code = excluded.ifsc_code,
             pan_number = excluded.pan_number,
             uan_number = excluded.uan_number,
             employee_code = excluded.employee_code,
             updated_at = datetime('now')",
        params![
            details.user_id,
            fmt_opt_date(details.date_of_birth),
            details.residential_address,
            details.nationality,
            details.personal_email,
            details.gender,
            details.marital_status,
            details.account_number,
            details.bank_name,
            details.ifsc_code,
            details.pan_number,
            details.uan_number,
            details.employee_code,
        ],
    )?;
    Ok(())
}

pub fn map_skill_row(row: &Row) -> Result<UserSkill> {
    Ok(UserSkill {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        skill_name: row.get("skill_name")?,
        proficiency_level: row.get("proficiency_level")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_skill(
    conn: &Connection,
    user_id: i64,
    skill_name: &str,
    proficiency: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO user_skills (user_id, skill_name, proficiency_level, created_at)
         VALUES (?1, ?2, ?3, datetime('now'))",
        params![user_id, skill_name, proficiency],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_skill(conn: &Connection, skill_id: i64) -> AppResult<Option<UserSkill>> {
    let mut stmt = conn.prepare("SELECT * FROM user_skills WHERE id = ?1")?;
    Ok(stmt.query_row([skill_id], map_skill_row).optional()?)
}

pub fn delete_skill(conn: &Connection, skill_id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM user_skills WHERE id = ?1", [skill_id])?;
    Ok(())
}

pub fn list_skills(conn: &Connection, user_id: i64) -> AppResult<Vec<UserSkill>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM user_skills WHERE user_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([user_id], map_skill_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_cert_row(row: &Row) -> Result<UserCertification> {
    Ok(UserCertification {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        certification_name: row.get("certification_name")?,
        issuing_organization: row.get("issuing_organization")?,
        issue_date: parse_opt_date("issue_date", row.get("issue_date")?)?,
        expiry_date: parse_opt_date("expiry_date", row.get("expiry_date")?)?,
        credential_id: row.get("credential_id")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_certification(conn: &Connection, cert: &UserCertification) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO user_certifications (user_id, certification_name, issuing_organization,
                                          issue_date, expiry_date, credential_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
        params![
            cert.user_id,
            cert.certification_name,
            cert.issuing_organization,
            fmt_opt_date(cert.issue_date),
            fmt_opt_date(cert.expiry_date),
            cert.credential_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_certification(conn: &Connection, cert_id: i64) -> AppResult<Option<UserCertification>> {
    let mut stmt = conn.prepare("SELECT * FROM user_certifications WHERE id = ?1")?;
    Ok(stmt.query_row([cert_id], map_cert_row).optional()?)
}

pub fn delete_certification(conn: &Connection, cert_id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM user_certifications WHERE id = ?1", [cert_id])?;
    Ok(())
}

pub fn list_certifications(conn: &Connection, user_id: i64) -> AppResult<Vec<UserCertification>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM user_certifications WHERE user_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([user_id], map_cert_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
