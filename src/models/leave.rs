//! Leave request and availability models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateRange;

/// The kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid holiday.
    Vacation,
    /// Sick leave.
    SickLeave,
    /// A single personal day.
    PersonalDay,
    /// Maternity or parental leave.
    Maternity,
    /// Unpaid leave.
    Unpaid,
}

/// Review status of a leave request. Only approved requests affect schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// A request for leave over an inclusive range of days.
///
/// # Example
///
/// ```
/// use roster_engine::models::{LeaveRequest, LeaveStatus, LeaveType};
/// use chrono::NaiveDate;
///
/// let leave = LeaveRequest {
///     id: "leave_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     leave_type: LeaveType::Vacation,
///     start_date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 2, 13).unwrap(),
///     status: LeaveStatus::Approved,
/// };
/// assert!(leave.covers(NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee requesting leave.
    pub employee_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Review status.
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Returns true if the request has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Returns true if the request is approved and covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_approved() && date >= self.start_date && date <= self.end_date
    }

    /// The part of an approved request that falls inside `range`.
    pub fn days_within(&self, range: &DateRange) -> Option<DateRange> {
        if !self.is_approved() || self.end_date < self.start_date {
            return None;
        }
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
        .intersection(range)
    }
}

/// An employee's stated availability for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// The employee the entry belongs to.
    pub employee_id: String,
    /// The day the entry refers to.
    pub date: NaiveDate,
    /// False when the employee asked not to be scheduled.
    pub available: bool,
    /// Optional reason given by the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
