// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use clap::Parser;
use serde_json::{Value, json};
use shift_roster_api::RosterConfig;
use shift_roster_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, Args, bootstrap_admin, build_router};

fn create_test_app_state() -> AppState {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    bootstrap_admin(&mut persistence, "admin123", 10).unwrap();
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: RosterConfig::new(10, 8),
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn hire(app: &Router, admin: &str, username: &str, role: &str, shift: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/employees",
        Some(admin),
        Some(json!({
            "name": username.to_uppercase(),
            "username": username,
            "password": "secret",
            "role": role,
            "shift": shift,
            "joinDate": "2021-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "hire failed: {body}");
    body["employee"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_login_and_whoami() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "admin", "admin123").await;

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "manager");
    assert_eq!(body["annualLeaveBalance"], 10);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_missing_or_malformed_token_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let (missing, _) = send(&app, "GET", "/api/leaves", None, None).await;
    let (bogus, _) = send(&app, "GET", "/api/leaves", Some("session_bogus"), None).await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(bogus, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app: Router = build_router(create_test_app_state());
    let token: String = login_token(&app, "admin", "admin123").await;

    let (status, _) = send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_operator_cannot_manage_employees() {
    let app: Router = build_router(create_test_app_state());
    let admin: String = login_token(&app, "admin", "admin123").await;
    hire(&app, &admin, "omar", "operator", "A").await;
    let omar: String = login_token(&app, "omar", "secret").await;

    let (status, body) = send(&app, "GET", "/api/employees", Some(&omar), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_leave_lifecycle_over_http() {
    let app: Router = build_router(create_test_app_state());
    let admin: String = login_token(&app, "admin", "admin123").await;
    hire(&app, &admin, "omar", "operator", "A").await;
    let omar: String = login_token(&app, "omar", "secret").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&omar),
        Some(json!({ "startDate": "2026-03-01", "endDate": "2026-03-05" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"], 5);
    assert_eq!(body["status"], "pending");
    let leave_id: i64 = body["id"].as_i64().unwrap();

    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&omar), None).await;
    assert_eq!(me["annualLeaveBalance"], 10);

    let approve_uri: String = format!("/api/leaves/{leave_id}/approve");
    let (status, body) = send(&app, "PUT", &approve_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["annualLeaveBalance"], 5);

    let reject_uri: String = format!("/api/leaves/{leave_id}/reject");
    let (status, body) = send(&app, "PUT", &reject_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["annualLeaveBalance"], 10);

    let (status, _) = send(&app, "PUT", &approve_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/leaves/{leave_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], Value::Null);

    let (_, leaves) = send(&app, "GET", "/api/leaves", Some(&omar), None).await;
    assert_eq!(leaves, json!([]));
}

#[tokio::test]
async fn test_leave_errors_map_to_status_codes() {
    let app: Router = build_router(create_test_app_state());
    let admin: String = login_token(&app, "admin", "admin123").await;
    hire(&app, &admin, "omar", "operator", "A").await;
    let omar: String = login_token(&app, "omar", "secret").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&omar),
        Some(json!({ "startDate": "2026-03-05", "endDate": "2026-03-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&omar),
        Some(json!({ "startDate": "2026-03-01", "endDate": "2026-03-11" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PUT", "/api/leaves/9999/approve", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/leaves",
        Some(&admin),
        Some(json!({ "startDate": "2026-03-01", "endDate": "2026-03-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_course_routes_and_nominations() {
    let app: Router = build_router(create_test_app_state());
    let admin: String = login_token(&app, "admin", "admin123").await;
    let omar_id: i64 = hire(&app, &admin, "omar", "operator", "A").await;
    hire(&app, &admin, "sara", "supervisor", "A").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&admin),
        Some(json!({
            "title": "Radar",
            "location": "Training centre",
            "date": "2026-01-10",
            "employeeId": omar_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let course_id: i64 = body["id"].as_i64().unwrap();

    let (status, ranked) = send(&app, "GET", "/api/courses/nominations", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ranked[0]["name"], "SARA");
    assert_eq!(ranked[1]["name"], "OMAR");
    assert_eq!(ranked[1]["lastDate"], "2026-01-10");

    let (_, operators) = send(
        &app,
        "GET",
        "/api/courses/nominations?role=operator",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(operators.as_array().unwrap().len(), 1);

    // Mandates are ranked separately from courses.
    let (_, mandates) = send(&app, "GET", "/api/mandates/nominations", Some(&admin), None).await;
    assert_eq!(mandates[0]["lastDate"], Value::Null);
    assert_eq!(mandates[1]["lastDate"], Value::Null);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/mandates/{course_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/courses/{course_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stats_and_activity_limit() {
    let app: Router = build_router(create_test_app_state());
    let admin: String = login_token(&app, "admin", "admin123").await;
    hire(&app, &admin, "omar", "operator", "B").await;

    let (status, stats) = send(&app, "GET", "/api/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalEmployees"], 2);
    assert_eq!(stats["operators"], 1);

    let (status, activity) =
        send(&app, "GET", "/api/stats/activity?limit=1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activity.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/api/stats/activity?limit=0", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_args_reject_unusable_config_values() {
    let defaults: Args = Args::try_parse_from(["shift-roster-server"]).unwrap();
    assert_eq!(defaults.default_leave_allotment, 36);
    assert_eq!(defaults.session_hours, 8);

    let longest: Args =
        Args::try_parse_from(["shift-roster-server", "--session-hours", "8784"]).unwrap();
    assert_eq!(longest.session_hours, 8784);

    assert!(Args::try_parse_from(["shift-roster-server", "--session-hours", "0"]).is_err());
    assert!(
        Args::try_parse_from(["shift-roster-server", "--session-hours", "100000000"]).is_err()
    );
    assert!(
        Args::try_parse_from([
            "shift-roster-server",
            "--default-leave-allotment",
            "3000000000",
        ])
        .is_err()
    );
}
