use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Leave balance policy. Hardcoded company policy, not configuration.
pub const PAID_LEAVE_QUOTA: i64 = 15;
pub const SICK_LEAVE_QUOTA: i64 = 7;
pub const TOTAL_LEAVE_QUOTA: i64 = PAID_LEAVE_QUOTA + SICK_LEAVE_QUOTA;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveType {
    Paid,
    Sick,
    Unpaid,
}

impl LeaveType {
    pub fn to_db_str(self) -> &'static str {
        match self {
            LeaveType::Paid => "paid",
            LeaveType::Sick => "sick",
            LeaveType::Unpaid => "unpaid",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(LeaveType::Paid),
            "sick" => Some(LeaveType::Sick),
            "unpaid" => Some(LeaveType::Unpaid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveDuration {
    FullDay,
    HalfDay,
}

impl LeaveDuration {
    pub fn to_db_str(self) -> &'static str {
        match self {
            LeaveDuration::FullDay => "full_day",
            LeaveDuration::HalfDay => "half_day",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "full_day" => Some(LeaveDuration::FullDay),
            "half_day" => Some(LeaveDuration::HalfDay),
            _ => None,
        }
    }
}

/// pending → approved | rejected. Both branches are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

/// Immutable once created, except for the decision fields.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate, // inclusive
    pub end_date: NaiveDate,   // inclusive
    pub duration: LeaveDuration,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<i64>,
    pub approved_at: Option<NaiveDateTime>,
    pub admin_comments: Option<String>,
    pub created_at: String,
}
