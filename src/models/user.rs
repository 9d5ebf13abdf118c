use chrono::NaiveDate;
use serde::Serialize;

/// Access roles, ordered from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub fn to_db_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Employee => "employee",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "hr" => Some(Role::Hr),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Admin and HR share most management capabilities.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }

    /// Label for the employee directory report.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Hr => "Hr",
            Role::Employee => "Employee",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub login_id: String,          // ⇔ users.login_id (UNIQUE, human-readable)
    pub email: String,             // ⇔ users.email (UNIQUE)
    pub password_hash: String,     // ⇔ users.password_hash (hex sha256)
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,                // ⇔ users.role ('admin' | 'hr' | 'employee')
    pub department: Option<String>,
    pub position: Option<String>,
    pub manager_id: Option<i64>,   // ⇔ users.manager_id (self-referential tree)
    pub company_id: i64,
    pub profile_picture: Option<String>, // file-storage reference
    pub date_joined: Option<NaiveDate>,
    pub is_active: bool,
    pub must_change_password: bool,
    pub created_at: String,        // TEXT, ISO8601
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The acting caller, as the identity boundary supplies it: just enough to
/// run policy checks and scope queries to one company.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: i64,
    pub role: Role,
    pub company_id: i64,
}

impl Caller {
    pub fn of(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            company_id: user.company_id,
        }
    }
}
