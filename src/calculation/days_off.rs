//! Weekly days-off rule.
//!
//! Counts days off per ISO week. Only weeks lying entirely inside the
//! validated window are evaluated; a week cut by the window edge cannot be
//! judged from the shifts in view.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{DateRange, LeaveRequest, Severity, Shift, Violation, ViolationCode, WeekRef};

/// Checks the number of days off in each full ISO week of `window`.
///
/// A day counts as off when it is covered by approved leave, even under a
/// working shift. Otherwise it needs no working shift and either a day-off
/// row or, with `count_unscheduled_days_as_off`, no shift row at all.
///
/// `shifts` are the employee's active shifts, day-off rows included.
pub fn check_days_off(
    employee_id: &str,
    window: DateRange,
    shifts: &[&Shift],
    leave: &[&LeaveRequest],
    min_days_off: u32,
    count_unscheduled_days_as_off: bool,
) -> Vec<Violation> {
    let worked: BTreeSet<NaiveDate> = shifts
        .iter()
        .filter(|s| s.is_working())
        .map(|s| s.date)
        .collect();
    let flagged_off: BTreeSet<NaiveDate> = shifts
        .iter()
        .filter(|s| s.is_active() && s.is_day_off)
        .map(|s| s.date)
        .collect();
    let scheduled: BTreeSet<NaiveDate> = shifts.iter().map(|s| s.date).collect();

    let is_off = |date: NaiveDate| {
        leave.iter().any(|l| l.covers(date))
            || (!worked.contains(&date)
                && (flagged_off.contains(&date)
                    || (count_unscheduled_days_as_off && !scheduled.contains(&date))))
    };

    let mut violations = Vec::new();
    for (_, week) in window.iso_weeks() {
        if week.num_days() < 7 {
            continue;
        }
        let days_off = week.days().filter(|d| is_off(*d)).count() as u32;
        if days_off >= min_days_off {
            continue;
        }

        let worked_dates: Vec<NaiveDate> = week.days().filter(|d| worked.contains(d)).collect();
        let week_ref = WeekRef::of(week.start_date);
        violations.push(Violation {
            employee_id: employee_id.to_string(),
            code: ViolationCode::MinDaysOff,
            severity: Severity::Error,
            dates: if worked_dates.is_empty() {
                week.days().collect()
            } else {
                worked_dates
            },
            shift_ids: shifts
                .iter()
                .filter(|s| s.is_working() && week.contains_date(s.date))
                .map(|s| s.id.clone())
                .collect(),
            week: Some(week_ref),
            measured: Some(Decimal::from(days_off)),
            limit: Some(Decimal::from(min_days_off)),
            message: format!(
                "{days_off} day(s) off in week {week_ref}, minimum is {min_days_off}"
            ),
        });
    }
    violations
}
