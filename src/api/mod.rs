//! HTTP API module for the roster engine.
//!
//! This module exposes schedule validation, the grid, the monthly report,
//! the plan lifecycle and live configuration over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CopyPlanRequest, CreatePlanRequest, GridRequest, MonthlyReportQuery, ValidateScheduleRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, DiscardResponse, PublishResponse, ValidateScheduleResponse,
};
pub use state::AppState;
