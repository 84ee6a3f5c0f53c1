//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod date_range;
mod employee;
mod grid;
mod leave;
mod monthly_report;
mod schedule_plan;
mod shift;
mod violation;
pub mod wall_time;

pub use date_range::{DateRange, MonthPeriod};
pub use employee::Employee;
pub use grid::{CellKind, DailyTotal, DepartmentGroup, GridCell, GridMatrix, GridRow, GridTotals};
pub use leave::{Availability, LeaveRequest, LeaveStatus, LeaveType};
pub use monthly_report::{
    DayEntry, EmployeeMonthlyRecord, GrandTotal, MonthlyReport, RecordFlag, ReportOmission,
    RoleTotal,
};
pub use schedule_plan::{PlanState, PlanStatus, SchedulePlan};
pub use shift::{Shift, ShiftStatus};
pub use violation::{Severity, Violation, ViolationCode, WeekRef, sort_violations};
pub use wall_time::parse_wall_time;
