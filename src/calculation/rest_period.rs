//! Minimum rest rule.
//!
//! Orders an employee's working shifts on the timeline and measures the gap
//! between the end of each shift (overnight aware) and the start of the
//! next one.

use rust_decimal::Decimal;

use crate::models::{Severity, Shift, Violation, ViolationCode};

use super::shift_hours::minutes_to_hours;

/// Checks the rest between consecutive working shifts of one employee.
///
/// A gap shorter than `min_rest_hours` is an error naming both shifts.
/// Overlapping shifts give a negative gap and are flagged the same way.
pub fn check_rest_periods(
    employee_id: &str,
    shifts: &[&Shift],
    min_rest_hours: Decimal,
) -> Vec<Violation> {
    let mut ordered: Vec<&Shift> = shifts.to_vec();
    ordered.sort_by(|a, b| {
        (a.date, a.start_time, a.id.as_str()).cmp(&(b.date, b.start_time, b.id.as_str()))
    });

    let min_rest_minutes = min_rest_hours * Decimal::from(60);

    ordered
        .windows(2)
        .filter_map(|pair| {
            let (previous, next) = (pair[0], pair[1]);
            let gap = previous.span().gap_minutes_until(&next.span());
            if Decimal::from(gap) >= min_rest_minutes {
                return None;
            }

            let rest = minutes_to_hours(gap);
            let message = if gap < 0 {
                format!(
                    "Shift {} overlaps shift {} by {} hours",
                    next.id,
                    previous.id,
                    -rest
                )
            } else {
                format!(
                    "Only {rest} hours of rest between shift {} and shift {}, minimum is {min_rest_hours}",
                    previous.id, next.id
                )
            };

            let mut dates = vec![previous.date, next.date];
            dates.dedup();

            Some(Violation {
                employee_id: employee_id.to_string(),
                code: ViolationCode::MinRest,
                severity: Severity::Error,
                dates,
                shift_ids: vec![previous.id.clone(), next.id.clone()],
                week: None,
                measured: Some(rest),
                limit: Some(min_rest_hours),
                message,
            })
        })
        .collect()
}
