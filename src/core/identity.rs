//! Registration (company get-or-create, login id, temp password) and
//! manager assignment with the acyclicity guard.

use crate::core::login_id;
use crate::core::password::{generate_temp_password, hash_password};
use crate::core::policy::{self, Action};
use crate::db::{audit, identity};
use crate::errors::{AppError, AppResult};
use crate::models::company::Company;
use crate::models::user::{Caller, Role, User};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use std::collections::HashSet;

pub struct RegisterInput<'a> {
    pub company_name: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: Role,
    pub department: Option<&'a str>,
    pub position: Option<&'a str>,
}

#[derive(Debug)]
pub struct Registered {
    pub user_id: i64,
    pub login_id: String,
    /// Shown once to the registrar; only the hash is stored.
    pub temp_password: String,
}

pub struct IdentityLogic;

impl IdentityLogic {
    /// Register a new employee. Admin/HR only, with one bootstrap
    /// exception: an empty user table accepts the first registration
    /// without a caller and forces the admin role.
    pub fn register(
        conn: &mut Connection,
        caller: Option<&Caller>,
        input: &RegisterInput,
        today: NaiveDate,
    ) -> AppResult<Registered> {
        let bootstrap = identity::users_count(conn)? == 0;

        let role = if bootstrap {
            Role::Admin
        } else {
            let caller = caller.ok_or(AppError::Unauthorized)?;
            policy::authorize(caller, Action::RegisterEmployee, None)?;
            input.role
        };

        let tx = conn.transaction()?;

        let company = match identity::find_company_by_name(&tx, input.company_name)? {
            Some(c) => c,
            None => {
                let code = Company::code_from_name(input.company_name);
                identity::insert_company(&tx, input.company_name, &code)?
            }
        };

        let login_id = login_id::generate(
            &tx,
            &company.code,
            input.first_name,
            input.last_name,
            today.year(),
        )?;
        let temp_password = generate_temp_password();

        let user_id = identity::insert_user(
            &tx,
            &identity::NewUser {
                login_id: &login_id,
                email: input.email,
                password_hash: &hash_password(&temp_password),
                first_name: input.first_name,
                last_name: input.last_name,
                phone: input.phone,
                role,
                department: input.department,
                position: input.position,
                company_id: company.id,
                date_joined: today,
            },
        )?;

        audit::record(
            &tx,
            "employee_registered",
            &login_id,
            &format!("Registered {} {}", input.first_name, input.last_name),
        )?;

        tx.commit()?;

        Ok(Registered {
            user_id,
            login_id,
            temp_password,
        })
    }

    /// Assign `manager` to `employee`. Rejected when the assignment would
    /// close a cycle in the manager tree (walk the manager's ancestor
    /// chain and refuse if the employee appears).
    pub fn assign_manager(
        conn: &Connection,
        caller: &Caller,
        employee: &User,
        manager: &User,
    ) -> AppResult<()> {
        policy::authorize(caller, Action::AssignManager, None)?;

        if employee.company_id != manager.company_id {
            return Err(AppError::InvalidValue {
                field: "manager",
                value: "manager belongs to a different company".to_string(),
            });
        }
        if employee.id == manager.id {
            return Err(AppError::InvalidValue {
                field: "manager",
                value: "an employee cannot manage themselves".to_string(),
            });
        }

        // Ancestor walk. The visited set also stops on pre-existing bad
        // data instead of looping forever.
        let mut visited = HashSet::new();
        let mut cursor = Some(manager.id);
        while let Some(id) = cursor {
            if id == employee.id {
                return Err(AppError::InvalidValue {
                    field: "manager",
                    value: "assignment would create a management cycle".to_string(),
                });
            }
            if !visited.insert(id) {
                break;
            }
            cursor = identity::require_user(conn, id)?.manager_id;
        }

        identity::set_manager(conn, employee.id, manager.id)?;
        audit::record(
            conn,
            "manager_assigned",
            &employee.login_id,
            &format!("Manager set to {}", manager.login_id),
        )?;
        Ok(())
    }
}
