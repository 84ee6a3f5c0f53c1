//! Availability rule: working shifts on days the employee marked unavailable.

use crate::models::{Availability, Severity, Shift, Violation, ViolationCode};

/// Flags working shifts on dates marked unavailable.
pub fn check_availability(
    employee_id: &str,
    shifts: &[&Shift],
    availability: &[&Availability],
) -> Vec<Violation> {
    shifts
        .iter()
        .filter(|s| s.is_working())
        .filter_map(|shift| {
            let entry = availability
                .iter()
                .find(|a| !a.available && a.date == shift.date)?;
            let reason = entry
                .reason
                .as_deref()
                .map(|r| format!(": {r}"))
                .unwrap_or_default();
            Some(Violation {
                employee_id: employee_id.to_string(),
                code: ViolationCode::Unavailable,
                severity: Severity::Warning,
                dates: vec![shift.date],
                shift_ids: vec![shift.id.clone()],
                week: None,
                measured: None,
                limit: None,
                message: format!(
                    "Shift {} on {} while the employee is unavailable{reason}",
                    shift.id, shift.date
                ),
            })
        })
        .collect()
}
