//! Profile operations: private/bank details, skills and certifications.
//! Ownership checks resolve against the record's user_id, not the target
//! named on the command line.

use crate::core::policy::{self, Action};
use crate::db::{audit, profile};
use crate::errors::{AppError, AppResult};
use crate::models::profile::{ProfileDetails, UserCertification, UserSkill};
use crate::models::user::Caller;
use rusqlite::Connection;

pub struct ProfileLogic;

impl ProfileLogic {
    /// Details for viewing: never fails on a missing row, the default
    /// record stands in until the first save.
    pub fn details(conn: &Connection, caller: &Caller, user_id: i64) -> AppResult<ProfileDetails> {
        policy::authorize(caller, Action::ViewProfile, Some(user_id))?;
        profile::get_or_default_details(conn, user_id)
    }

    /// Save the full details record, creating the row on first write.
    pub fn save_details(
        conn: &Connection,
        caller: &Caller,
        details: &ProfileDetails,
    ) -> AppResult<()> {
        policy::authorize(caller, Action::EditProfile, Some(details.user_id))?;
        profile::save_details(conn, details)?;
        audit::record(
            conn,
            "profile_updated",
            &details.user_id.to_string(),
            "Profile details saved",
        )?;
        Ok(())
    }

    pub fn skills(conn: &Connection, caller: &Caller, user_id: i64) -> AppResult<Vec<UserSkill>> {
        policy::authorize(caller, Action::ViewProfile, Some(user_id))?;
        profile::list_skills(conn, user_id)
    }

    pub fn add_skill(
        conn: &Connection,
        caller: &Caller,
        user_id: i64,
        skill_name: &str,
        proficiency: Option<&str>,
    ) -> AppResult<i64> {
        policy::authorize(caller, Action::ManageSkills, Some(user_id))?;
        if skill_name.trim().is_empty() {
            return Err(AppError::InvalidValue {
                field: "skill_name",
                value: "must not be empty".to_string(),
            });
        }
        profile::insert_skill(conn, user_id, skill_name.trim(), proficiency)
    }

    /// Delete a skill. The owner check runs against the stored row, so a
    /// caller cannot remove someone else's entry by guessing ids.
    pub fn delete_skill(conn: &Connection, caller: &Caller, skill_id: i64) -> AppResult<()> {
        let skill = profile::find_skill(conn, skill_id)?.ok_or(AppError::NotFound {
            entity: "Skill",
            id: skill_id.to_string(),
        })?;
        policy::authorize(caller, Action::ManageSkills, Some(skill.user_id))?;
        profile::delete_skill(conn, skill_id)
    }

    pub fn certifications(
        conn: &Connection,
        caller: &Caller,
        user_id: i64,
    ) -> AppResult<Vec<UserCertification>> {
        policy::authorize(caller, Action::ViewProfile, Some(user_id))?;
        profile::list_certifications(conn, user_id)
    }

    pub fn add_certification(
        conn: &Connection,
        caller: &Caller,
        cert: &UserCertification,
    ) -> AppResult<i64> {
        policy::authorize(caller, Action::ManageSkills, Some(cert.user_id))?;
        if cert.certification_name.trim().is_empty() {
            return Err(AppError::InvalidValue {
                field: "certification_name",
                value: "must not be empty".to_string(),
            });
        }
        profile::insert_certification(conn, cert)
    }

    pub fn delete_certification(conn: &Connection, caller: &Caller, cert_id: i64) -> AppResult<()> {
        let cert = profile::find_certification(conn, cert_id)?.ok_or(AppError::NotFound {
            entity: "Certification",
            id: cert_id.to_string(),
        })?;
        policy::authorize(caller, Action::ManageSkills, Some(cert.user_id))?;
        profile::delete_certification(conn, cert_id)
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
             VALUES ('ACJODO20240001', 'j@acme.com', 'h', 'John', 'Doe',
                     'employee', 1, datetime('now')),
                    ('ACMARO20240001', 'm@acme.com', 'h', 'Mary', 'Roe',
                     'employee', 1, datetime('now'))",
            [],
        )
        .unwrap();
        conn
    }

    fn emp(user_id: i64) -> Caller {
        Caller {
            user_id,
            role: Role::Employee,
            company_id: 1,
        }
    }

    #[test]
    fn details_default_until_first_save() {
        let conn = mem_db();

        let d = ProfileLogic::details(&conn, &emp(1), 1).unwrap();
        assert!(d.is_unsaved());
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM profile_details", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);

        let mut d = d;
        d.bank_name = Some("State Bank".to_string());
        ProfileLogic::save_details(&conn, &emp(1), &d).unwrap();

        let d = ProfileLogic::details(&conn, &emp(1), 1).unwrap();
        assert!(!d.is_unsaved());
        assert_eq!(d.bank_name.as_deref(), Some("State Bank"));
    }

    #[test]
    fn saving_twice_updates_in_place() {
        let conn = mem_db();
        let mut d = ProfileDetails::default_for(1);
        d.nationality = Some("Indian".to_string());
        ProfileLogic::save_details(&conn, &emp(1), &d).unwrap();
        d.nationality = Some("British".to_string());
        ProfileLogic::save_details(&conn, &emp(1), &d).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM profile_details", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        let d = ProfileLogic::details(&conn, &emp(1), 1).unwrap();
        assert_eq!(d.nationality.as_deref(), Some("British"));
    }

    #[test]
    fn skill_ownership_follows_the_stored_row() {
        let conn = mem_db();
        let id = ProfileLogic::add_skill(&conn, &emp(1), 1, "Rust", Some("Advanced")).unwrap();

        // user 2 cannot delete user 1's skill
        let err = ProfileLogic::delete_skill(&conn, &emp(2), id).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        ProfileLogic::delete_skill(&conn, &emp(1), id).unwrap();
        assert!(ProfileLogic::skills(&conn, &emp(1), 1).unwrap().is_empty());
    }

    #[test]
    fn blank_skill_names_are_rejected() {
        let conn = mem_db();
        let err = ProfileLogic::add_skill(&conn, &emp(1), 1, "   ", None).unwrap_err();
        assert!(matches!(err, AppError::InvalidValue { .. }));
    }

    #[test]
    fn staff_can_view_but_employees_cannot_peek() {
        let conn = mem_db();
        let hr = Caller {
            user_id: 9,
            role: Role::Hr,
            company_id: 1,
        };
        assert!(ProfileLogic::details(&conn, &hr, 1).is_ok());
        assert!(ProfileLogic::details(&conn, &emp(2), 1).is_err());
    }

    #[test]
    fn missing_certification_reports_not_found() {
        let conn = mem_db();
        let err = ProfileLogic::delete_certification(&conn, &emp(1), 42).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
