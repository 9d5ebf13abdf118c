//! Capability checks. Every entry point that acts on behalf of a caller
//! goes through `authorize` instead of sprinkling role comparisons around.

use crate::errors::{AppError, AppResult};
use crate::models::user::Caller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RegisterEmployee,
    AssignManager,
    CheckInOut,
    ApplyLeave,
    DecideLeave,
    ViewAttendance,
    ViewSalary,
    EditSalary,
    BulkPayroll,
    RunReports,
    ViewProfile,
    EditProfile,
    ManageSkills,
}

impl Action {
    /// Management actions only admin/hr may perform, regardless of owner.
    fn staff_only(self) -> bool {
        matches!(
            self,
            Action::RegisterEmployee
                | Action::AssignManager
                | Action::DecideLeave
                | Action::EditSalary
                | Action::BulkPayroll
                | Action::RunReports
        )
    }

    /// Actions bound to the caller's own records even for staff: you check
    /// in and apply for leave as yourself, never on someone's behalf.
    fn owner_only(self) -> bool {
        matches!(self, Action::CheckInOut | Action::ApplyLeave)
    }
}

/// Allow or deny `action` for `caller`, optionally scoped to the record
/// owner. Denials carry no detail about why.
pub fn authorize(caller: &Caller, action: Action, resource_owner: Option<i64>) -> AppResult<()> {
    if action.owner_only() {
        return match resource_owner {
            Some(owner) if owner == caller.user_id => Ok(()),
            _ => Err(AppError::Unauthorized),
        };
    }

    if action.staff_only() {
        return if caller.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        };
    }

    // Remaining actions: the owner, or any admin/hr.
    if caller.role.is_staff() {
        return Ok(());
    }
    match resource_owner {
        Some(owner) if owner == caller.user_id => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn caller(user_id: i64, role: Role) -> Caller {
        Caller {
            user_id,
            role,
            company_id: 1,
        }
    }

    #[test]
    fn staff_actions_denied_to_employees() {
        let emp = caller(5, Role::Employee);
        assert!(authorize(&emp, Action::DecideLeave, None).is_err());
        assert!(authorize(&emp, Action::RegisterEmployee, None).is_err());
        assert!(authorize(&emp, Action::BulkPayroll, None).is_err());
        assert!(authorize(&emp, Action::RunReports, None).is_err());
    }

    #[test]
    fn staff_actions_allowed_to_admin_and_hr() {
        for role in [Role::Admin, Role::Hr] {
            let c = caller(1, role);
            assert!(authorize(&c, Action::DecideLeave, None).is_ok());
            assert!(authorize(&c, Action::EditSalary, Some(99)).is_ok());
        }
    }

    #[test]
    fn check_in_is_owner_only_even_for_admin() {
        let admin = caller(1, Role::Admin);
        assert!(authorize(&admin, Action::CheckInOut, Some(1)).is_ok());
        assert!(authorize(&admin, Action::CheckInOut, Some(2)).is_err());
    }

    #[test]
    fn employees_see_their_own_records_only() {
        let emp = caller(5, Role::Employee);
        assert!(authorize(&emp, Action::ViewSalary, Some(5)).is_ok());
        assert!(authorize(&emp, Action::ViewSalary, Some(6)).is_err());
        assert!(authorize(&emp, Action::ViewProfile, Some(5)).is_ok());
        assert!(authorize(&emp, Action::ManageSkills, Some(6)).is_err());
    }
}
