pub mod attendance;
pub mod audit;
pub mod identity;
pub mod initialize;
pub mod leave;
pub mod migrate;
pub mod payroll;
pub mod pool;
pub mod profile;
