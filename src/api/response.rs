//! Response types for the roster engine API.
//!
//! This module defines the success bodies that are not plain models, the
//! error body, and the mapping from [`EngineError`] to HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DateRange, PlanStatus, SchedulePlan, Violation};
use crate::schedule::PublishOutcome;

/// Response body for `POST /schedule/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateScheduleResponse {
    /// The validated employee.
    pub employee_id: String,
    /// The validated range.
    pub range: DateRange,
    /// True when there are no violations of any severity.
    pub compliant: bool,
    /// Findings, sorted by date then code.
    pub violations: Vec<Violation>,
}

/// Response body for `POST /plans/:plan_id/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    /// The published plan.
    pub plan: SchedulePlan,
    /// Always `published` on success.
    pub status: PlanStatus,
    /// When the plan was published.
    pub published_at: Option<DateTime<Utc>>,
    /// The plan this one replaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded: Option<String>,
    /// Non-blocking findings.
    pub warnings: Vec<Violation>,
}

impl From<PublishOutcome> for PublishResponse {
    fn from(outcome: PublishOutcome) -> Self {
        Self {
            status: outcome.plan.status(),
            published_at: outcome.plan.published_at(),
            plan: outcome.plan,
            superseded: outcome.superseded,
            warnings: outcome.warnings,
        }
    }
}

/// Response body for `DELETE /plans/:plan_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscardResponse {
    /// The discarded plan.
    pub plan_id: String,
    /// Number of shifts deleted with it.
    pub shifts_removed: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code, details) = match &error {
            EngineError::EmployeeNotFound { .. } => {
                (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND", None)
            }
            EngineError::PlanNotFound { .. } => (StatusCode::NOT_FOUND, "PLAN_NOT_FOUND", None),
            EngineError::ShiftNotFound { .. } => (StatusCode::NOT_FOUND, "SHIFT_NOT_FOUND", None),
            EngineError::TemplateNotFound { .. } => {
                (StatusCode::NOT_FOUND, "TEMPLATE_NOT_FOUND", None)
            }
            EngineError::DuplicateShift { .. }
            | EngineError::ShiftOutsidePlanWindow { .. }
            | EngineError::OverlappingPublishedPlan { .. } => (
                StatusCode::CONFLICT,
                "DATA_INTEGRITY",
                Some("The write was rejected and no data was changed"),
            ),
            EngineError::PlanAlreadyPublished { .. } => {
                (StatusCode::CONFLICT, "PLAN_ALREADY_PUBLISHED", None)
            }
            EngineError::PlanNotEditable { .. } => {
                (StatusCode::CONFLICT, "PLAN_NOT_EDITABLE", None)
            }
            EngineError::PublishBlocked { .. } => (
                StatusCode::CONFLICT,
                "PUBLISH_BLOCKED",
                Some("Validate the plan to list the blocking violations"),
            ),
            EngineError::InvalidTime { .. } => (StatusCode::BAD_REQUEST, "INVALID_TIME", None),
            EngineError::InvalidDateRange { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_DATE_RANGE", None)
            }
            EngineError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, "INVALID_MONTH", None),
            EngineError::InvalidShift { .. } => (StatusCode::BAD_REQUEST, "INVALID_SHIFT", None),
            EngineError::InvalidConfiguration { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_CONFIGURATION", None)
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::MissingLaborConstraints => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", None)
            }
            EngineError::Cancelled { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CANCELLED",
                Some("The operation ran past its deadline"),
            ),
        };

        let error = match details {
            Some(details) => ApiError::with_details(code, message, details),
            None => ApiError::new(code, message),
        };
        ApiErrorResponse { status, error }
    }
}
