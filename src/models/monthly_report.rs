//! Monthly aggregation report models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ShiftCategory;

use super::MonthPeriod;

/// What was recorded for one employee on one day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Worked hours (zero for day off and leave-only days).
    pub hours: Decimal,
    /// Template code of the shift, if any.
    pub shift_type: Option<String>,
    /// Resolved category of the shift, if any.
    pub category: Option<ShiftCategory>,
    /// The shift row was a day off.
    #[serde(default)]
    pub is_day_off: bool,
    /// The day is covered by approved leave.
    #[serde(default)]
    pub is_leave: bool,
    /// Both a working shift and approved leave exist for the day.
    #[serde(default)]
    pub leave_overlap: bool,
}

/// Flags attached to an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFlag {
    /// No usable hourly rate; cost omitted.
    MissingHourlyRate,
    /// At least one day has both a shift and approved leave.
    LeaveOverlap,
}

/// One employee's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonthlyRecord {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Role used for roll-ups.
    pub role: String,
    /// The rate used for costing, if any.
    pub hourly_rate: Option<Decimal>,
    /// Per-day entries keyed by date.
    pub days: BTreeMap<NaiveDate, DayEntry>,
    /// Worked hours in the month.
    pub total_hours: Decimal,
    /// Hours up to the prorated monthly maximum.
    pub regular_hours: Decimal,
    /// Hours beyond the prorated monthly maximum.
    pub overtime_hours: Decimal,
    /// Labor cost; `None` when the rate is missing.
    pub total_cost: Option<Decimal>,
    /// Number of approved leave days in the month.
    pub leave_days: u32,
    /// Days with a shift and approved leave, to be reviewed manually.
    pub review_dates: Vec<NaiveDate>,
    /// Flags raised while aggregating.
    pub flags: Vec<RecordFlag>,
}

/// Totals for one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTotal {
    /// Worked hours.
    pub total_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Labor cost of employees with a rate.
    pub total_cost: Decimal,
    /// Number of employees in the report with this role.
    pub count: u32,
}

/// Totals across every employee in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandTotal {
    /// Worked hours.
    pub hours: Decimal,
    /// Regular hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
    /// Labor cost of employees with a rate.
    pub cost: Decimal,
    /// Number of employees in the report.
    pub employees: u32,
}

/// An employee whose cost could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOmission {
    /// The employee.
    pub employee_id: String,
    /// Why the cost was left out.
    pub reason: RecordFlag,
    /// Hours that were counted without a cost.
    pub uncosted_hours: Decimal,
}

/// The monthly payroll-grade report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The month reported.
    pub period: MonthPeriod,
    /// Monthly regular-hours ceiling used for the split.
    pub monthly_regular_max: Decimal,
    /// Employees with hours or leave in the month, ordered by id.
    pub employees: Vec<EmployeeMonthlyRecord>,
    /// Totals per role.
    pub role_totals: BTreeMap<String, RoleTotal>,
    /// Totals across all employees.
    pub grand_total: GrandTotal,
    /// Costs left out of the totals, and why.
    pub omissions: Vec<ReportOmission>,
}
