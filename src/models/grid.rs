//! Schedule grid models.
//!
//! The grid is the employees × dates matrix used to author and view a
//! schedule. It is produced by
//! [`build_grid`](crate::schedule::build_grid) and is plain data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ShiftCategory;

use super::{DateRange, LeaveType, Violation};

/// What a grid cell primarily shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// A working shift (possibly overlaid with leave, see `is_leave`).
    Shift,
    /// A scheduled day off.
    DayOff,
    /// Approved leave with no shift underneath.
    Leave,
    /// Nothing scheduled.
    Empty,
}

/// One employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// The date of the cell.
    pub date: NaiveDate,
    /// What the cell shows.
    pub kind: CellKind,
    /// The underlying shift, if any.
    pub shift_id: Option<String>,
    /// The template code of the shift, if any.
    pub shift_type: Option<String>,
    /// Resolved category; `None` for empty cells and ad-hoc shifts.
    pub category: Option<ShiftCategory>,
    /// Worked hours shown in the cell (zero for day off, leave and empty).
    pub hours: Decimal,
    /// The shift row is a day off.
    pub is_day_off: bool,
    /// The date is covered by approved leave. Kept alongside any shift hours.
    pub is_leave: bool,
    /// The kind of leave when `is_leave` is set.
    pub leave_type: Option<LeaveType>,
    /// The employee marked the date unavailable.
    pub is_unavailable: bool,
    /// Some row violation names this date.
    pub has_violation: bool,
}

/// One employee's row across the grid dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Role used for grouping.
    pub role: String,
    /// One cell per grid date, in date order.
    pub cells: Vec<GridCell>,
    /// Sum of the cells' working hours.
    pub total_hours: Decimal,
    /// `total_hours × hourly_rate`; `None` when the employee has no rate.
    pub total_cost: Option<Decimal>,
    /// Findings from validating this employee's shifts over the grid range.
    pub violations: Vec<Violation>,
    /// True when no error-severity finding exists.
    pub compliant: bool,
}

/// Rows of one department (role).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentGroup {
    /// The role grouped.
    pub role: String,
    /// Display label.
    pub label: String,
    /// Sort position of the group.
    pub order: u32,
    /// Rows sorted by employee name.
    pub rows: Vec<GridRow>,
    /// Hours across the group.
    pub total_hours: Decimal,
    /// Cost across rows that have a rate.
    pub total_cost: Decimal,
}

/// Working hours and headcount for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The date.
    pub date: NaiveDate,
    /// Hours across all rows.
    pub hours: Decimal,
    /// Number of employees with a working shift.
    pub headcount: u32,
}

/// Totals over the whole grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTotals {
    /// Hours across all rows.
    pub hours: Decimal,
    /// Cost across rows that have a rate.
    pub cost: Decimal,
    /// Employees with at least one working shift.
    pub scheduled_employees: u32,
}

/// The complete employees × dates matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMatrix {
    /// The range covered.
    pub range: DateRange,
    /// The column dates, in order.
    pub dates: Vec<NaiveDate>,
    /// Rows grouped by department, in department order.
    pub groups: Vec<DepartmentGroup>,
    /// One entry per column date.
    pub daily_totals: Vec<DailyTotal>,
    /// Grid-level findings not tied to one employee.
    pub coverage: Vec<Violation>,
    /// Totals over the whole grid.
    pub totals: GridTotals,
}

impl GridMatrix {
    /// Iterates over all rows regardless of group.
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    /// Finds the row of one employee.
    pub fn row(&self, employee_id: &str) -> Option<&GridRow> {
        self.rows().find(|r| r.employee_id == employee_id)
    }
}

impl GridRow {
    /// Finds the cell for a date.
    pub fn cell(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}
