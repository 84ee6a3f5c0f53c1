//! Calculation logic for the roster engine.
//!
//! This module contains the pure functions of the engine: shift duration
//! with overnight and split handling, labor cost and the monthly overtime
//! split, and the compliance rules (weekly hours, rest between shifts, days
//! off, leave and availability conflicts) combined by the validation engine.

mod availability_conflict;
mod days_off;
mod labor_cost;
mod leave_conflict;
mod rest_period;
mod shift_hours;
mod validation;
mod weekly_hours;

pub use availability_conflict::check_availability;
pub use days_off::check_days_off;
pub use labor_cost::{HoursSplit, WEEKS_PER_MONTH, labor_cost, monthly_regular_max, split_overtime};
pub use leave_conflict::check_leave_conflicts;
pub use rest_period::check_rest_periods;
pub use shift_hours::{
    MINUTES_PER_DAY, MINUTES_PER_HOUR, ShiftHoursBreakdown, ShiftSpan, calculate_shift_hours,
    minutes_to_hours, shift_span, wall_clock_minutes,
};
pub use validation::{
    EmployeeSchedule, ValidationOptions, check_one_shift_per_day, validate_employee_schedule,
};
pub use weekly_hours::check_weekly_hours;
