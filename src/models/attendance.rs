use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    Leave,
}

impl AttendanceStatus {
    pub fn to_db_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::Leave => "leave",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "half_day" => Some(AttendanceStatus::HalfDay),
            "leave" => Some(AttendanceStatus::Leave),
            _ => None,
        }
    }

    /// Human label for views ("half_day" → "Half Day").
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::Leave => "Leave",
        }
    }
}

/// One ledger row per (employee, calendar date). The UNIQUE(employee_id,
/// date) index in the schema backs that invariant.
#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,                  // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub check_in: Option<NaiveDateTime>,  // ⇔ attendance.check_in (TEXT "YYYY-MM-DD HH:MM:SS")
    pub check_out: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
    pub hours_worked: f64,                // derived on check-out, fractional hours
    pub created_at: String,
}

impl Attendance {
    /// Fresh row for a date, before any check-in.
    pub fn new(employee_id: i64, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: 0,
            employee_id,
            date,
            check_in: None,
            check_out: None,
            status,
            hours_worked: 0.0,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
