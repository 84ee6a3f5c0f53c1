//! Error types for the roster engine.
//!
//! Schedule non-compliance is never an error: it is returned as a list of
//! [`Violation`](crate::models::Violation)s. The variants here cover data
//! integrity failures at the write boundary, unknown records, configuration
//! problems and malformed input.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the roster engine.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::PlanNotFound {
///     plan_id: "plan_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Schedule plan not found: plan_001");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but not usable.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfiguration {
        /// The configuration field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No labor constraints have been configured.
    #[error("Labor constraints are not configured")]
    MissingLaborConstraints,

    /// Shift template code was not found in the registry.
    #[error("Shift template not found: {code}")]
    TemplateNotFound {
        /// The template code that was not found.
        code: String,
    },

    /// Employee was not found.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was requested.
        employee_id: String,
    },

    /// Schedule plan was not found.
    #[error("Schedule plan not found: {plan_id}")]
    PlanNotFound {
        /// The plan id that was requested.
        plan_id: String,
    },

    /// Shift was not found.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id that was requested.
        shift_id: String,
    },

    /// A wall-clock time string could not be parsed.
    #[error("Invalid time '{value}': expected HH:MM or HH:MM:SS")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A date range is reversed, too long or outside the supported calendar.
    #[error("Invalid date range: {start_date} to {end_date}")]
    InvalidDateRange {
        /// The start of the rejected range.
        start_date: NaiveDate,
        /// The end of the rejected range.
        end_date: NaiveDate,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Two active shifts for one employee on one date within a plan.
    #[error("Employee '{employee_id}' already has an active shift on {date} in plan '{plan_id}'")]
    DuplicateShift {
        /// The employee with the clashing shifts.
        employee_id: String,
        /// The date of the clash.
        date: NaiveDate,
        /// The plan both shifts belong to.
        plan_id: String,
    },

    /// A shift date lies outside the window of its plan.
    #[error("Shift '{shift_id}' on {date} is outside the window of plan '{plan_id}'")]
    ShiftOutsidePlanWindow {
        /// The offending shift.
        shift_id: String,
        /// The shift date.
        date: NaiveDate,
        /// The owning plan.
        plan_id: String,
    },

    /// Publishing would leave two published plans covering the same dates.
    #[error("Plan '{plan_id}' overlaps published plan '{published_plan_id}'")]
    OverlappingPublishedPlan {
        /// The plan being published.
        plan_id: String,
        /// The already published plan.
        published_plan_id: String,
    },

    /// The plan has already left the draft state.
    #[error("Schedule plan '{plan_id}' is already published")]
    PlanAlreadyPublished {
        /// The plan id.
        plan_id: String,
    },

    /// Shifts of a non-draft plan cannot be edited.
    #[error("Schedule plan '{plan_id}' is not editable: {message}")]
    PlanNotEditable {
        /// The plan id.
        plan_id: String,
        /// Why the edit was refused.
        message: String,
    },

    /// The final validation pass found errors and the policy blocks publishing.
    #[error("Publishing plan '{plan_id}' blocked by {error_count} validation error(s)")]
    PublishBlocked {
        /// The plan id.
        plan_id: String,
        /// Number of error-severity violations found.
        error_count: usize,
    },

    /// A long-running operation was cancelled or ran past its deadline.
    #[error("Operation cancelled: {operation}")]
    Cancelled {
        /// The operation that was aborted.
        operation: String,
    },
}

impl EngineError {
    /// Returns true for errors that reject a write to protect stored data.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            EngineError::DuplicateShift { .. }
                | EngineError::ShiftOutsidePlanWindow { .. }
                | EngineError::OverlappingPublishedPlan { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
