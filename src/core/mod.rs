pub mod attendance;
pub mod identity;
pub mod leave;
pub mod login_id;
pub mod password;
pub mod payroll;
pub mod policy;
pub mod profile;
