//! Request types for the roster engine API.
//!
//! Dates arrive as separate `start_date`/`end_date` fields and are turned
//! into a checked [`DateRange`] before reaching the service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::DateRange;
use crate::schedule::GridFilters;

/// Request body for `POST /schedule/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateScheduleRequest {
    /// The employee to validate.
    pub employee_id: String,
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// Draft plan to preview in place of the published shifts.
    #[serde(default)]
    pub plan_id: Option<String>,
}

impl ValidateScheduleRequest {
    /// The requested range; fails if it ends before it starts.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Request body for `POST /schedule/grid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRequest {
    /// First column of the grid.
    pub start_date: NaiveDate,
    /// Last column of the grid.
    pub end_date: NaiveDate,
    /// Draft plan to preview.
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Row filters.
    #[serde(default)]
    pub filters: GridFilters,
}

impl GridRequest {
    /// The requested range; fails if it ends before it starts.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Query string for `GET /reports/monthly`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthlyReportQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

/// Request body for `POST /plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    /// First day of the plan window.
    pub start_date: NaiveDate,
    /// Last day of the plan window.
    pub end_date: NaiveDate,
}

impl CreatePlanRequest {
    /// The plan window; fails if it ends before it starts.
    pub fn window(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Request body for `POST /plans/:plan_id/copy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyPlanRequest {
    /// First day of the new plan's window.
    pub target_start: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_deserialize_validate_request() {
        let json = r#"{
            "employee_id": "emp_001",
            "start_date": "2026-02-09",
            "end_date": "2026-02-15"
        }"#;

        let request: ValidateScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert!(request.plan_id.is_none());
        assert_eq!(request.range().unwrap().num_days(), 7);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let json = r#"{
            "employee_id": "emp_001",
            "start_date": "2026-02-15",
            "end_date": "2026-02-09"
        }"#;

        let request: ValidateScheduleRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request.range(),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_deserialize_grid_request_with_filters() {
        let json = r#"{
            "start_date": "2026-02-09",
            "end_date": "2026-02-15",
            "filters": { "roles": ["waiter"] }
        }"#;

        let request: GridRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.filters.roles, Some(vec!["waiter".to_string()]));
        assert!(request.filters.employee_ids.is_none());
    }

    #[test]
    fn test_grid_request_filters_default_to_none() {
        let json = r#"{ "start_date": "2026-02-09", "end_date": "2026-02-15" }"#;
        let request: GridRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.filters, GridFilters::default());
    }
}
