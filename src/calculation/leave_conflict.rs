//! Leave conflict rule.
//!
//! A working shift on a day of approved leave is kept as scheduled and
//! surfaced as a warning for manual review.

use crate::models::{LeaveRequest, Severity, Shift, Violation, ViolationCode};

/// Flags working shifts that fall on approved leave.
pub fn check_leave_conflicts(
    employee_id: &str,
    shifts: &[&Shift],
    leave: &[&LeaveRequest],
) -> Vec<Violation> {
    shifts
        .iter()
        .filter(|s| s.is_working())
        .filter_map(|shift| {
            let request = leave.iter().find(|l| l.covers(shift.date))?;
            Some(Violation {
                employee_id: employee_id.to_string(),
                code: ViolationCode::LeaveConflict,
                severity: Severity::Warning,
                dates: vec![shift.date],
                shift_ids: vec![shift.id.clone()],
                week: None,
                measured: None,
                limit: None,
                message: format!(
                    "Shift {} on {} falls on approved {:?} leave ({})",
                    shift.id, shift.date, request.leave_type, request.id
                ),
            })
        })
        .collect()
}
