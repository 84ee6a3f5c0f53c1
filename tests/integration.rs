//! Integration tests for the roster engine HTTP API.
//!
//! This test suite drives the router end to end:
//! - Schedule validation (weekly hours, rest, days off, leave)
//! - Plan lifecycle (create, sync, publish, replan, copy, discard, cancel)
//! - Schedule grid and monthly report
//! - Live configuration updates
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use roster_engine::api::{AppState, create_router};
use roster_engine::config::ConfigLoader;
use roster_engine::models::{LeaveRequest, LeaveStatus, LeaveType};
use roster_engine::schedule::ScheduleService;
use roster_engine::store::ScheduleStore;

// =============================================================================
// Test Helpers
// =============================================================================

const CONFIG_DIR: &str = "./config/default";

fn create_test_service() -> ScheduleService<roster_engine::store::MemoryStore> {
    let config = ConfigLoader::load(CONFIG_DIR).expect("Failed to load config");
    let employees = ConfigLoader::load_employees(CONFIG_DIR).expect("Failed to load employees");
    ScheduleService::from_config(&config, employees)
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(create_test_service()))
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value.as_str().unwrap_or_else(|| panic!("Expected decimal string, got {value}"));
    assert_eq!(normalize_decimal(actual), normalize_decimal(expected));
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_shift(id: &str, employee_id: &str, date: &str, start_time: &str, end_time: &str) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "date": date,
        "start_time": start_time,
        "end_time": end_time
    })
}

fn create_day_off(id: &str, employee_id: &str, date: &str) -> Value {
    json!({
        "id": id,
        "employee_id": employee_id,
        "date": date,
        "shift_type": "D",
        "start_time": "00:00",
        "end_time": "00:00",
        "is_day_off": true
    })
}

/// Creates a draft for the ISO week of 2026-02-09 and returns its id.
async fn create_week_plan(router: &Router) -> String {
    let (status, plan) = send(
        router,
        "POST",
        "/plans",
        Some(json!({ "start_date": "2026-02-09", "end_date": "2026-02-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(plan["state"]["status"], "draft");
    plan["id"].as_str().unwrap().to_string()
}

async fn sync(router: &Router, plan_id: &str, shifts: Vec<Value>) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        &format!("/plans/{plan_id}/sync"),
        Some(json!({ "create": shifts })),
    )
    .await
}

async fn validate(router: &Router, employee_id: &str, plan_id: Option<&str>) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/schedule/validate",
        Some(json!({
            "employee_id": employee_id,
            "start_date": "2026-02-09",
            "end_date": "2026-02-15",
            "plan_id": plan_id
        })),
    )
    .await
}

fn violation_codes(result: &Value) -> Vec<String> {
    result["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["code"].as_str().unwrap().to_string())
        .collect()
}

fn weekend_off(employee_id: &str) -> Vec<Value> {
    vec![
        create_day_off(&format!("{employee_id}_sat"), employee_id, "2026-02-14"),
        create_day_off(&format!("{employee_id}_sun"), employee_id, "2026-02-15"),
    ]
}

// =============================================================================
// VAL-001: 16-hour week with two days off is compliant
// =============================================================================

#[tokio::test]
async fn test_val_001_sixteen_hour_week_compliant() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;

    let mut shifts = vec![
        create_shift("s1", "emp_001", "2026-02-09", "09:00", "17:00"),
        create_shift("s2", "emp_001", "2026-02-10", "09:00", "17:00"),
    ];
    shifts.extend(weekend_off("emp_001"));
    let (status, summary) = sync(&router, &plan_id, shifts).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["created"], 4);

    let (status, result) = validate(&router, "emp_001", Some(&plan_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["compliant"], true, "violations: {}", result["violations"]);
    assert!(result["violations"].as_array().unwrap().is_empty());
}

// =============================================================================
// VAL-002: 48-hour week exceeds the 40-hour maximum
// =============================================================================

#[tokio::test]
async fn test_val_002_forty_eight_hour_week_violation() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;

    let mut shifts: Vec<Value> = ["09", "10", "11", "12", "13", "14"]
        .iter()
        .map(|d| {
            create_shift(&format!("s{d}"), "emp_001", &format!("2026-02-{d}"), "09:00", "17:00")
        })
        .collect();
    shifts.push(create_day_off("d15", "emp_001", "2026-02-15"));
    sync(&router, &plan_id, shifts).await;

    let (_, result) = validate(&router, "emp_001", Some(&plan_id)).await;
    assert_eq!(result["compliant"], false);

    let weekly = result["violations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["code"] == "max_weekly_hours")
        .expect("max_weekly_hours violation");
    assert_eq!(weekly["severity"], "error");
    assert_decimal(&weekly["measured"], "48");
    assert_decimal(&weekly["limit"], "40");
    assert!(violation_codes(&result).contains(&"min_days_off".to_string()));
}

// =============================================================================
// VAL-003: night shift ending 02:00 followed by a 09:00 start
// =============================================================================

#[tokio::test]
async fn test_val_003_short_rest_after_night_shift() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;

    let mut shifts = vec![
        create_shift("night", "emp_002", "2026-02-09", "18:00", "02:00"),
        create_shift("morning", "emp_002", "2026-02-10", "09:00", "17:00"),
    ];
    shifts.extend(weekend_off("emp_002"));
    sync(&router, &plan_id, shifts).await;

    let (_, result) = validate(&router, "emp_002", Some(&plan_id)).await;
    let rest = result["violations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["code"] == "min_rest")
        .expect("min_rest violation");
    assert_decimal(&rest["measured"], "7");
    assert_decimal(&rest["limit"], "12");
    assert_eq!(rest["shift_ids"], json!(["night", "morning"]));
}

// =============================================================================
// VAL-004: draft shifts are invisible without a preview
// =============================================================================

#[tokio::test]
async fn test_val_004_draft_not_visible_without_preview() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let shifts: Vec<Value> = ["09", "10", "11", "12", "13", "14"]
        .iter()
        .map(|d| {
            create_shift(&format!("s{d}"), "emp_001", &format!("2026-02-{d}"), "09:00", "17:00")
        })
        .collect();
    sync(&router, &plan_id, shifts).await;

    let (_, published) = validate(&router, "emp_001", None).await;
    assert!(!violation_codes(&published).contains(&"max_weekly_hours".to_string()));

    let (_, preview) = validate(&router, "emp_001", Some(&plan_id)).await;
    assert!(violation_codes(&preview).contains(&"max_weekly_hours".to_string()));
}

// =============================================================================
// VAL-005: approved leave under working shifts counts toward days off
// =============================================================================

#[tokio::test]
async fn test_val_005_leave_days_count_as_days_off() {
    let service = create_test_service();
    service
        .store()
        .transaction(|c| {
            c.leave_requests.insert(
                "leave_001".to_string(),
                LeaveRequest {
                    id: "leave_001".to_string(),
                    employee_id: "emp_001".to_string(),
                    leave_type: LeaveType::Vacation,
                    start_date: make_date("2026-02-14"),
                    end_date: make_date("2026-02-15"),
                    status: LeaveStatus::Approved,
                },
            );
            Ok(())
        })
        .unwrap();
    let router = create_router(AppState::new(service));

    let plan_id = create_week_plan(&router).await;
    let shifts: Vec<Value> = ["09", "10", "11", "12", "13", "14", "15"]
        .iter()
        .map(|d| {
            create_shift(&format!("s{d}"), "emp_001", &format!("2026-02-{d}"), "09:00", "13:00")
        })
        .collect();
    sync(&router, &plan_id, shifts).await;

    let (status, result) = validate(&router, "emp_001", Some(&plan_id)).await;
    assert_eq!(status, StatusCode::OK);
    let codes = violation_codes(&result);
    assert!(!codes.contains(&"min_days_off".to_string()));
    assert!(codes.contains(&"leave_conflict".to_string()));
}

// =============================================================================
// LIFE-001: publish, then publish again
// =============================================================================

#[tokio::test]
async fn test_life_001_publish_then_publish_again_conflicts() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let mut shifts = vec![create_shift("s1", "emp_001", "2026-02-09", "10:30", "17:00")];
    shifts.extend(weekend_off("emp_001"));
    sync(&router, &plan_id, shifts).await;

    let (status, result) = send(&router, "POST", &format!("/plans/{plan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "published");
    assert!(result["published_at"].is_string());
    assert!(result["warnings"].as_array().unwrap().is_empty());

    let (status, error) = send(&router, "POST", &format!("/plans/{plan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "PLAN_ALREADY_PUBLISHED");

    // The published plan no longer accepts edits
    let (status, error) = sync(
        &router,
        &plan_id,
        vec![create_shift("s2", "emp_001", "2026-02-10", "09:00", "17:00")],
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "PLAN_NOT_EDITABLE");
}

// =============================================================================
// LIFE-002: a blocked publish leaves the plan as an editable draft
// =============================================================================

#[tokio::test]
async fn test_life_002_blocked_publish_leaves_draft() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let shifts: Vec<Value> = ["09", "10", "11", "12", "13", "14"]
        .iter()
        .map(|d| {
            create_shift(&format!("s{d}"), "emp_001", &format!("2026-02-{d}"), "09:00", "17:00")
        })
        .collect();
    sync(&router, &plan_id, shifts).await;

    let (status, error) = send(&router, "POST", &format!("/plans/{plan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "PUBLISH_BLOCKED");

    // Still a draft: edits are accepted and the report sees nothing
    let (status, _) = send(
        &router,
        "POST",
        &format!("/plans/{plan_id}/sync"),
        Some(json!({ "delete": ["s14"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, report) = send(&router, "GET", "/reports/monthly?year=2026&month=2", None).await;
    assert!(report["employees"].as_array().unwrap().is_empty());
}

// =============================================================================
// LIFE-003: a duplicate shift rolls back the whole sync batch
// =============================================================================

#[tokio::test]
async fn test_life_003_duplicate_shift_rolls_back_batch() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;

    let (status, error) = sync(
        &router,
        &plan_id,
        vec![
            create_shift("a", "emp_001", "2026-02-09", "09:00", "13:00"),
            create_shift("b", "emp_003", "2026-02-09", "09:00", "13:00"),
            create_shift("c", "emp_001", "2026-02-09", "17:00", "21:00"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DATA_INTEGRITY");

    let (_, grid) = send(
        &router,
        "POST",
        "/schedule/grid",
        Some(json!({
            "start_date": "2026-02-09",
            "end_date": "2026-02-15",
            "plan_id": plan_id
        })),
    )
    .await;
    assert_decimal(&grid["totals"]["hours"], "0");
}

// =============================================================================
// LIFE-004: overlapping published plans are rejected; replan supersedes
// =============================================================================

#[tokio::test]
async fn test_life_004_overlap_rejected_replan_supersedes() {
    let router = create_router_for_test();
    let first = create_week_plan(&router).await;
    let mut shifts = vec![create_shift("s1", "emp_001", "2026-02-09", "09:00", "17:00")];
    shifts.extend(weekend_off("emp_001"));
    sync(&router, &first, shifts).await;
    send(&router, "POST", &format!("/plans/{first}/publish"), None).await;

    let second = create_week_plan(&router).await;
    let (status, error) = send(&router, "POST", &format!("/plans/{second}/publish"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DATA_INTEGRITY");

    let (status, replan) = send(&router, "POST", &format!("/plans/{first}/replan"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(replan["version"], 2);
    assert_eq!(replan["supersedes"], first.as_str());

    let replan_id = replan["id"].as_str().unwrap();
    let (status, result) = send(&router, "POST", &format!("/plans/{replan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["superseded"], first.as_str());

    // Exactly one copy of the shift counts in the report
    let (_, report) = send(&router, "GET", "/reports/monthly?year=2026&month=2", None).await;
    assert_decimal(&report["grand_total"]["hours"], "8");
}

// =============================================================================
// LIFE-005: copy, cancel and discard
// =============================================================================

#[tokio::test]
async fn test_life_005_copy_cancel_discard() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    sync(
        &router,
        &plan_id,
        vec![create_shift("s1", "emp_001", "2026-02-11", "09:00", "17:00")],
    )
    .await;

    let (status, copy) = send(
        &router,
        "POST",
        &format!("/plans/{plan_id}/copy"),
        Some(json!({ "target_start": "2026-02-16" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["window"]["start_date"], "2026-02-16");
    assert_eq!(copy["window"]["end_date"], "2026-02-22");
    assert_eq!(copy["copied_from"], plan_id.as_str());

    let (status, cancelled) = send(&router, "POST", "/shifts/s1/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, discarded) = send(&router, "DELETE", &format!("/plans/{plan_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(discarded["shifts_removed"], 1);

    let (status, error) = send(&router, "POST", &format!("/plans/{plan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "PLAN_NOT_FOUND");

    let (status, error) = send(&router, "POST", "/shifts/missing/cancel", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "SHIFT_NOT_FOUND");
}

// =============================================================================
// GRID-001: role filter, department grouping and Sunday coverage
// =============================================================================

#[tokio::test]
async fn test_grid_001_filters_and_coverage() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    sync(
        &router,
        &plan_id,
        vec![
            create_shift("a", "emp_001", "2026-02-09", "10:30", "17:00"),
            create_shift("b", "emp_003", "2026-02-10", "17:00", "23:00"),
            create_shift("c", "emp_002", "2026-02-10", "09:00", "17:00"),
        ],
    )
    .await;

    let (status, grid) = send(
        &router,
        "POST",
        "/schedule/grid",
        Some(json!({
            "start_date": "2026-02-09",
            "end_date": "2026-02-15",
            "plan_id": plan_id,
            "filters": { "roles": ["waiter"] }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grid["dates"].as_array().unwrap().len(), 7);

    let groups = grid["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["role"], "waiter");
    assert_eq!(groups[0]["label"], "Floor");
    let ids: Vec<&str> = groups[0]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["employee_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["emp_001", "emp_003"]);

    // 6.5h at 12.50 + 6h at 12.50
    assert_decimal(&grid["totals"]["hours"], "12.5");
    assert_decimal(&grid["totals"]["cost"], "156.25");

    let coverage = grid["coverage"].as_array().unwrap();
    assert_eq!(coverage.len(), 1);
    assert_eq!(coverage[0]["code"], "no_coverage");
    assert_eq!(coverage[0]["dates"], json!(["2026-02-15"]));
}

// =============================================================================
// REP-001: monthly report with a missing rate
// =============================================================================

#[tokio::test]
async fn test_rep_001_monthly_report_totals_and_omissions() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let mut shifts = vec![
        create_shift("a", "emp_001", "2026-02-09", "09:00", "17:00"),
        create_shift("b", "emp_001", "2026-02-10", "09:00", "17:00"),
        create_shift("c", "emp_004", "2026-02-10", "18:00", "02:00"),
    ];
    shifts.extend(weekend_off("emp_001"));
    shifts.extend(weekend_off("emp_004"));
    sync(&router, &plan_id, shifts).await;
    let (status, _) = send(&router, "POST", &format!("/plans/{plan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, report) = send(&router, "GET", "/reports/monthly?year=2026&month=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["employees"].as_array().unwrap().len(), 2);
    assert_decimal(&report["grand_total"]["hours"], "24");
    // Only emp_001 is costed: 16h at 12.50
    assert_decimal(&report["grand_total"]["cost"], "200");
    assert_eq!(report["grand_total"]["employees"], 2);
    assert_eq!(report["omissions"][0]["employee_id"], "emp_004");
    assert_eq!(report["omissions"][0]["reason"], "missing_hourly_rate");
    assert_eq!(report["role_totals"]["bartender"]["count"], 1);
    assert!(report["employees"][1]["total_cost"].is_null());
}

// =============================================================================
// REP-002: leave over a shift counts the shift once and is flagged
// =============================================================================

#[tokio::test]
async fn test_rep_002_leave_over_shift() {
    let service = create_test_service();
    service
        .store()
        .transaction(|c| {
            c.leave_requests.insert(
                "leave_001".to_string(),
                LeaveRequest {
                    id: "leave_001".to_string(),
                    employee_id: "emp_001".to_string(),
                    leave_type: LeaveType::SickLeave,
                    start_date: make_date("2026-02-10"),
                    end_date: make_date("2026-02-10"),
                    status: LeaveStatus::Approved,
                },
            );
            Ok(())
        })
        .unwrap();
    let router = create_router(AppState::new(service));

    let plan_id = create_week_plan(&router).await;
    let mut shifts = vec![create_shift("a", "emp_001", "2026-02-10", "09:00", "17:00")];
    shifts.extend(weekend_off("emp_001"));
    sync(&router, &plan_id, shifts).await;

    let (status, result) = send(&router, "POST", &format!("/plans/{plan_id}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["warnings"][0]["code"], "leave_conflict");
    assert_eq!(result["warnings"][0]["severity"], "warning");

    let (_, report) = send(&router, "GET", "/reports/monthly?year=2026&month=2", None).await;
    let record = &report["employees"][0];
    assert_decimal(&record["total_hours"], "8");
    assert_eq!(record["leave_days"], 1);
    assert_eq!(record["review_dates"], json!(["2026-02-10"]));
    assert_eq!(record["days"]["2026-02-10"]["is_leave"], true);
    assert_eq!(record["days"]["2026-02-10"]["leave_overlap"], true);
}

// =============================================================================
// CFG-001: live constraint and template updates
// =============================================================================

#[tokio::test]
async fn test_cfg_001_raise_weekly_maximum() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let mut shifts: Vec<Value> = ["09", "10", "11", "12", "13"]
        .iter()
        .map(|d| {
            create_shift(&format!("s{d}"), "emp_001", &format!("2026-02-{d}"), "08:00", "17:00")
        })
        .collect();
    shifts.extend(weekend_off("emp_001"));
    sync(&router, &plan_id, shifts).await;

    let (_, before) = validate(&router, "emp_001", Some(&plan_id)).await;
    assert!(violation_codes(&before).contains(&"max_weekly_hours".to_string()));

    let (status, _) = send(
        &router,
        "PUT",
        "/config/labor-constraints",
        Some(json!({
            "max_weekly_hours": "48",
            "min_rest_between_shifts": "12",
            "min_days_off_per_week": 2,
            "overtime_multiplier": "1.5",
            "overtime_warning_threshold": "46"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = validate(&router, "emp_001", Some(&plan_id)).await;
    assert_eq!(after["compliant"], true, "violations: {}", after["violations"]);
}

#[tokio::test]
async fn test_cfg_002_invalid_updates_rejected() {
    let router = create_router_for_test();

    let (status, error) = send(
        &router,
        "PUT",
        "/config/labor-constraints",
        Some(json!({
            "max_weekly_hours": "-5",
            "min_rest_between_shifts": "12",
            "min_days_off_per_week": 2,
            "overtime_multiplier": "1.5",
            "overtime_warning_threshold": "35"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_CONFIGURATION");

    let (status, error) = send(
        &router,
        "PUT",
        "/config/shift-templates/E",
        Some(json!({
            "code": "X",
            "label": "Early",
            "category": "morning",
            "start": "06:00",
            "end": "12:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_CONFIGURATION");

    let (status, template) = send(
        &router,
        "PUT",
        "/config/shift-templates/E",
        Some(json!({
            "code": "E",
            "label": "Early",
            "category": "morning",
            "start": "06:00",
            "end": "12:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(template["code"], "E");
}

// =============================================================================
// ERR: error cases
// =============================================================================

#[tokio::test]
async fn test_err_001_unknown_employee_in_sync() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let (status, error) = sync(
        &router,
        &plan_id,
        vec![create_shift("a", "emp_999", "2026-02-09", "09:00", "17:00")],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_err_002_shift_outside_plan_window() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let (status, error) = sync(
        &router,
        &plan_id,
        vec![create_shift("a", "emp_001", "2026-02-20", "09:00", "17:00")],
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DATA_INTEGRITY");
}

#[tokio::test]
async fn test_err_003_malformed_time() {
    let router = create_router_for_test();
    let plan_id = create_week_plan(&router).await;
    let (status, error) = sync(
        &router,
        &plan_id,
        vec![create_shift("a", "emp_001", "2026-02-09", "9am", "17:00")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_err_004_missing_month_query() {
    let router = create_router_for_test();
    let (status, error) = send(&router, "GET", "/reports/monthly?year=2026", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_err_005_grid_range_longer_than_a_year() {
    let router = create_router_for_test();
    let (status, error) = send(
        &router,
        "POST",
        "/schedule/grid",
        Some(json!({ "start_date": "2026-01-01", "end_date": "2031-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_DATE_RANGE");
}
