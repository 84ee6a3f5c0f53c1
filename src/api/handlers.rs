//! HTTP request handlers for the roster engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{LaborConstraints, ShiftTemplate};
use crate::error::EngineError;
use crate::schedule::ShiftChanges;

use super::request::{
    CopyPlanRequest, CreatePlanRequest, GridRequest, MonthlyReportQuery, ValidateScheduleRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, DiscardResponse, PublishResponse, ValidateScheduleResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedule/validate", post(validate_schedule_handler))
        .route("/schedule/grid", post(build_grid_handler))
        .route("/reports/monthly", get(monthly_report_handler))
        .route("/plans", post(create_plan_handler))
        .route("/plans/:plan_id", delete(discard_plan_handler))
        .route("/plans/:plan_id/publish", post(publish_plan_handler))
        .route("/plans/:plan_id/sync", post(sync_plan_handler))
        .route("/plans/:plan_id/copy", post(copy_plan_handler))
        .route("/plans/:plan_id/replan", post(replan_handler))
        .route("/shifts/:shift_id/cancel", post(cancel_shift_handler))
        .route(
            "/config/labor-constraints",
            put(put_labor_constraints_handler),
        )
        .route(
            "/config/shift-templates/:code",
            put(put_shift_template_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, operation: &str, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /schedule/validate.
async fn validate_schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = request.range().and_then(|range| {
        state
            .service()
            .validate_schedule(&request.employee_id, range, request.plan_id.as_deref())
            .map(|violations| (range, violations))
    });

    match result {
        Ok((range, violations)) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                violations = violations.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Validation completed"
            );
            json_response(
                StatusCode::OK,
                ValidateScheduleResponse {
                    employee_id: request.employee_id,
                    range,
                    compliant: violations.is_empty(),
                    violations,
                },
            )
        }
        Err(err) => error_response(correlation_id, "validate_schedule", err),
    }
}

/// Handler for POST /schedule/grid.
async fn build_grid_handler(
    State(state): State<AppState>,
    payload: Result<Json<GridRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing grid request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = request.range().and_then(|range| {
        state
            .service()
            .build_grid(range, &request.filters, request.plan_id.as_deref())
    });

    match result {
        Ok(grid) => {
            info!(
                correlation_id = %correlation_id,
                rows = grid.rows().count(),
                days = grid.dates.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Grid built"
            );
            json_response(StatusCode::OK, grid)
        }
        Err(err) => error_response(correlation_id, "build_grid", err),
    }
}

/// Handler for GET /reports/monthly.
///
/// The aggregation runs on the blocking pool.
async fn monthly_report_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthlyReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly report request");

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection,
                "Invalid query string"
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let service = state.shared_service();
    let result =
        tokio::task::spawn_blocking(move || service.monthly_report(query.year, query.month)).await;

    match result {
        Ok(Ok(report)) => {
            info!(
                correlation_id = %correlation_id,
                year = query.year,
                month = query.month,
                employees = report.grand_total.employees,
                "Monthly report completed"
            );
            json_response(StatusCode::OK, report)
        }
        Ok(Err(err)) => error_response(correlation_id, "monthly_report", err),
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Monthly report task failed"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Monthly report task failed"),
            )
        }
    }
}

/// Handler for POST /plans.
async fn create_plan_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match request
        .window()
        .and_then(|window| state.service().create_plan(window))
    {
        Ok(plan) => {
            info!(correlation_id = %correlation_id, plan_id = %plan.id, "Plan created");
            json_response(StatusCode::CREATED, plan)
        }
        Err(err) => error_response(correlation_id, "create_plan", err),
    }
}

/// Handler for POST /plans/:plan_id/publish.
async fn publish_plan_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, plan_id = %plan_id, "Processing publish request");

    match state.service().publish_plan(&plan_id) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                plan_id = %plan_id,
                warnings = outcome.warnings.len(),
                "Plan published"
            );
            json_response(StatusCode::OK, PublishResponse::from(outcome))
        }
        Err(err) => error_response(correlation_id, "publish_plan", err),
    }
}

/// Handler for POST /plans/:plan_id/sync.
async fn sync_plan_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    payload: Result<Json<ShiftChanges>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let changes = match payload {
        Ok(Json(changes)) => changes,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().sync_plan_shifts(&plan_id, changes) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                plan_id = %plan_id,
                created = summary.created,
                updated = summary.updated,
                deleted = summary.deleted,
                "Plan synced"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => error_response(correlation_id, "sync_plan_shifts", err),
    }
}

/// Handler for POST /plans/:plan_id/copy.
async fn copy_plan_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    payload: Result<Json<CopyPlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().copy_plan(&plan_id, request.target_start) {
        Ok(plan) => json_response(StatusCode::CREATED, plan),
        Err(err) => error_response(correlation_id, "copy_plan", err),
    }
}

/// Handler for POST /plans/:plan_id/replan.
async fn replan_handler(State(state): State<AppState>, Path(plan_id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().replan(&plan_id) {
        Ok(plan) => json_response(StatusCode::CREATED, plan),
        Err(err) => error_response(correlation_id, "replan", err),
    }
}

/// Handler for DELETE /plans/:plan_id.
async fn discard_plan_handler(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().discard_plan(&plan_id) {
        Ok(shifts_removed) => json_response(
            StatusCode::OK,
            DiscardResponse {
                plan_id,
                shifts_removed,
            },
        ),
        Err(err) => error_response(correlation_id, "discard_plan", err),
    }
}

/// Handler for POST /shifts/:shift_id/cancel.
async fn cancel_shift_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().cancel_shift(&shift_id) {
        Ok(shift) => json_response(StatusCode::OK, shift),
        Err(err) => error_response(correlation_id, "cancel_shift", err),
    }
}

/// Handler for PUT /config/labor-constraints.
async fn put_labor_constraints_handler(
    State(state): State<AppState>,
    payload: Result<Json<LaborConstraints>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let constraints = match payload {
        Ok(Json(constraints)) => constraints,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().set_labor_constraints(constraints.clone()) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, "Labor constraints updated");
            json_response(StatusCode::OK, constraints)
        }
        Err(err) => error_response(correlation_id, "set_labor_constraints", err),
    }
}

/// Handler for PUT /config/shift-templates/:code.
async fn put_shift_template_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<ShiftTemplate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let template = match payload {
        Ok(Json(template)) => template,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().upsert_shift_template(&code, template.clone()) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, code = %code, "Shift template updated");
            json_response(StatusCode::OK, template)
        }
        Err(err) => error_response(correlation_id, "upsert_shift_template", err),
    }
}
