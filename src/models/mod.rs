pub mod attendance;
pub mod company;
pub mod leave;
pub mod profile;
pub mod salary;
pub mod user;
