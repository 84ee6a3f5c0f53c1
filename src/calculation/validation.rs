//! Constraint validation engine.
//!
//! Runs every compliance rule over one employee's schedule and returns the
//! findings as data. Non-compliance is never an error; an empty list means
//! the schedule is compliant.
//!
//! ## Rules
//!
//! | Rule | Severity |
//! |------|----------|
//! | Weekly hours above the maximum | error |
//! | Weekly hours above the warning threshold | warning |
//! | Rest between consecutive shifts below the minimum | error |
//! | Too few days off in a full ISO week | error |
//! | Working shift on approved leave | warning |
//! | Working shift on an unavailable day | warning |

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LaborConstraints;
use crate::error::{EngineError, EngineResult};
use crate::models::{Availability, DateRange, LeaveRequest, Shift, Violation, sort_violations};

use super::availability_conflict::check_availability;
use super::days_off::check_days_off;
use super::leave_conflict::check_leave_conflicts;
use super::rest_period::check_rest_periods;
use super::weekly_hours::check_weekly_hours;

/// Behavior switches taken from the engine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Count days without any shift row as days off.
    pub count_unscheduled_days_as_off: bool,
}

/// Everything the validator needs to know about one employee.
///
/// The slices may contain records of other employees, cancelled shifts or
/// unapproved leave; they are filtered out.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeSchedule<'a> {
    /// The employee being validated.
    pub employee_id: &'a str,
    /// The days under evaluation.
    pub window: DateRange,
    /// Candidate shifts.
    pub shifts: &'a [Shift],
    /// Candidate leave requests.
    pub leave: &'a [LeaveRequest],
    /// Candidate availability entries.
    pub availability: &'a [Availability],
}

/// Validates one employee's schedule against the labor constraints.
///
/// The result is sorted by first date, then rule, so the same input always
/// produces the same output.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{EmployeeSchedule, ValidationOptions, validate_employee_schedule};
/// use roster_engine::config::LaborConstraints;
/// use roster_engine::models::DateRange;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let constraints = LaborConstraints {
///     max_weekly_hours: Decimal::new(40, 0),
///     min_rest_between_shifts: Decimal::new(12, 0),
///     min_days_off_per_week: 2,
///     overtime_multiplier: Decimal::new(15, 1),
///     overtime_warning_threshold: Decimal::new(35, 0),
/// };
/// let schedule = EmployeeSchedule {
///     employee_id: "emp_001",
///     window: DateRange::iso_week_of(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()),
///     shifts: &[],
///     leave: &[],
///     availability: &[],
/// };
/// let options = ValidationOptions { count_unscheduled_days_as_off: true };
///
/// assert!(validate_employee_schedule(&schedule, &constraints, &options).is_empty());
/// ```
pub fn validate_employee_schedule(
    schedule: &EmployeeSchedule<'_>,
    constraints: &LaborConstraints,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let employee_id = schedule.employee_id;
    let window = schedule.window;

    let active: Vec<&Shift> = schedule
        .shifts
        .iter()
        .filter(|s| s.employee_id == employee_id && s.is_active() && window.contains_date(s.date))
        .collect();
    let working: Vec<&Shift> = active.iter().copied().filter(|s| s.is_working()).collect();
    let leave: Vec<&LeaveRequest> = schedule
        .leave
        .iter()
        .filter(|l| l.employee_id == employee_id && l.is_approved())
        .collect();
    let availability: Vec<&Availability> = schedule
        .availability
        .iter()
        .filter(|a| a.employee_id == employee_id && window.contains_date(a.date))
        .collect();

    let mut violations = Vec::new();
    violations.extend(check_weekly_hours(employee_id, &working, constraints));
    violations.extend(check_rest_periods(
        employee_id,
        &working,
        constraints.min_rest_between_shifts,
    ));
    violations.extend(check_days_off(
        employee_id,
        window,
        &active,
        &leave,
        constraints.min_days_off_per_week,
        options.count_unscheduled_days_as_off,
    ));
    violations.extend(check_leave_conflicts(employee_id, &working, &leave));
    violations.extend(check_availability(employee_id, &working, &availability));

    sort_violations(&mut violations);
    violations
}

/// Checks that no employee has two active shifts on one date within a plan.
///
/// Cancelled shifts are ignored. Fails with `DuplicateShift` on the first
/// collision found.
pub fn check_one_shift_per_day<'a, I>(shifts: I) -> EngineResult<()>
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut seen: HashSet<(&str, &str, NaiveDate)> = HashSet::new();
    for shift in shifts.into_iter().filter(|s| s.is_active()) {
        let key = (
            shift.employee_id.as_str(),
            shift.schedule_plan_id.as_str(),
            shift.date,
        );
        if !seen.insert(key) {
            return Err(EngineError::DuplicateShift {
                employee_id: shift.employee_id.clone(),
                date: shift.date,
                plan_id: shift.schedule_plan_id.clone(),
            });
        }
    }
    Ok(())
}
