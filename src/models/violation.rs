//! Compliance violation models.
//!
//! A violation is data, not failure: the validation engine returns a list
//! of them and an empty list means the schedule is compliant.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Breaks a labor constraint.
    Error,
    /// Worth attention but within the rules.
    Warning,
}

/// Machine-readable reason a violation was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Weekly hours above the configured maximum.
    MaxWeeklyHours,
    /// Weekly hours above the pre-overtime warning threshold.
    OvertimeWarning,
    /// Not enough rest between two consecutive shifts.
    MinRest,
    /// Too few days off in an ISO week.
    MinDaysOff,
    /// A working shift on a day of approved leave.
    LeaveConflict,
    /// A working shift on a day the employee marked unavailable.
    Unavailable,
    /// A Sunday with nobody scheduled.
    NoCoverage,
}

/// An ISO-8601 week reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekRef {
    /// ISO week-numbering year.
    pub year: i32,
    /// ISO week number, 1 to 53.
    pub week: u32,
}

impl WeekRef {
    /// The ISO week containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl std::fmt::Display for WeekRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// A single compliance finding.
///
/// Carries enough context (employee, dates, shifts, rule) to be acted on
/// without re-running the validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The employee concerned; empty for grid-level coverage findings.
    pub employee_id: String,
    /// The rule that raised the finding.
    pub code: ViolationCode,
    /// Error or warning.
    pub severity: Severity,
    /// The dates involved, ascending.
    pub dates: Vec<NaiveDate>,
    /// The shifts involved.
    #[serde(default)]
    pub shift_ids: Vec<String>,
    /// The ISO week for weekly rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<WeekRef>,
    /// The measured value (hours, rest hours or days).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Decimal>,
    /// The configured limit the measurement was compared with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    /// Returns true for error-severity findings.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns true if the finding names `date`.
    pub fn mentions(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Sort key giving a stable, input-order independent ordering.
    pub(crate) fn sort_key(&self) -> (Option<NaiveDate>, ViolationCode, &str, &[String]) {
        (
            self.dates.first().copied(),
            self.code,
            self.employee_id.as_str(),
            self.shift_ids.as_slice(),
        )
    }
}

/// Sorts violations into their canonical order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(code: ViolationCode, day: u32) -> Violation {
        Violation {
            employee_id: "emp_001".to_string(),
            code,
            severity: Severity::Error,
            dates: vec![NaiveDate::from_ymd_opt(2026, 2, day).unwrap()],
            shift_ids: vec![],
            week: None,
            measured: None,
            limit: None,
            message: String::new(),
        }
    }

    #[test]
    fn test_week_ref_display() {
        let week = WeekRef::of(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert_eq!(week, WeekRef { year: 2026, week: 7 });
        assert_eq!(week.to_string(), "2026-W07");
    }

    #[test]
    fn test_week_ref_uses_iso_year() {
        // 2027-01-01 is a Friday and belongs to the last ISO week of 2026
        let week = WeekRef::of(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(week.year, 2026);
        assert_eq!(week.week, 53);
    }

    #[test]
    fn test_sort_orders_by_date_then_code() {
        let mut list = vec![
            violation(ViolationCode::MinRest, 12),
            violation(ViolationCode::MinDaysOff, 9),
            violation(ViolationCode::MaxWeeklyHours, 9),
        ];
        sort_violations(&mut list);
        assert_eq!(list[0].code, ViolationCode::MaxWeeklyHours);
        assert_eq!(list[1].code, ViolationCode::MinDaysOff);
        assert_eq!(list[2].code, ViolationCode::MinRest);
    }

    #[test]
    fn test_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ViolationCode::MaxWeeklyHours).unwrap(),
            "\"max_weekly_hours\""
        );
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }
}
