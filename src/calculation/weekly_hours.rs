//! Weekly hours rule.
//!
//! Sums worked time per ISO week and compares it with the configured
//! maximum and the pre-overtime warning threshold. Comparison happens in
//! whole minutes so a week at exactly the maximum never trips the rule.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LaborConstraints;
use crate::models::{Severity, Shift, Violation, ViolationCode, WeekRef};

use super::shift_hours::minutes_to_hours;

/// Worked minutes, dates and shift ids of one ISO week.
#[derive(Debug, Default)]
struct WeekTally<'a> {
    minutes: i64,
    dates: Vec<NaiveDate>,
    shift_ids: Vec<&'a str>,
}

/// Checks weekly worked hours for one employee.
///
/// `shifts` must already be restricted to the employee's working shifts.
/// Exceeding `max_weekly_hours` is an error; exceeding
/// `overtime_warning_threshold` but not the maximum is a warning.
pub fn check_weekly_hours(
    employee_id: &str,
    shifts: &[&Shift],
    constraints: &LaborConstraints,
) -> Vec<Violation> {
    let mut weeks: BTreeMap<WeekRef, WeekTally<'_>> = BTreeMap::new();
    for shift in shifts {
        let tally = weeks.entry(WeekRef::of(shift.date)).or_default();
        tally.minutes += shift.worked_minutes();
        tally.dates.push(shift.date);
        tally.shift_ids.push(shift.id.as_str());
    }

    let max_minutes = constraints.max_weekly_hours * Decimal::from(60);
    let warning_minutes = constraints.overtime_warning_threshold * Decimal::from(60);

    let mut violations = Vec::new();
    for (week, mut tally) in weeks {
        let worked = Decimal::from(tally.minutes);
        let (code, severity, limit) = if worked > max_minutes {
            (
                ViolationCode::MaxWeeklyHours,
                Severity::Error,
                constraints.max_weekly_hours,
            )
        } else if worked > warning_minutes {
            (
                ViolationCode::OvertimeWarning,
                Severity::Warning,
                constraints.overtime_warning_threshold,
            )
        } else {
            continue;
        };

        tally.dates.sort();
        tally.dates.dedup();
        let hours = minutes_to_hours(tally.minutes);
        let message = match code {
            ViolationCode::MaxWeeklyHours => format!(
                "{hours} hours scheduled in week {week}, above the maximum of {limit}"
            ),
            _ => format!(
                "{hours} hours scheduled in week {week}, above the overtime warning threshold of {limit}"
            ),
        };

        violations.push(Violation {
            employee_id: employee_id.to_string(),
            code,
            severity,
            dates: tally.dates,
            shift_ids: tally.shift_ids.into_iter().map(str::to_string).collect(),
            week: Some(week),
            measured: Some(hours),
            limit: Some(limit),
            message,
        });
    }
    violations
}
