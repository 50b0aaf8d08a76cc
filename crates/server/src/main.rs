// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shift_roster_api::{
    ActivityInfo, ApiError, ChangePasswordRequest, CreateEmployeeRequest, DEFAULT_LEAVE_ALLOTMENT,
    DEFAULT_SESSION_HOURS, EmployeeInfo, EmployeeResponse, LeaveDecisionResponse, LeaveInfo,
    LoginRequest, LoginResponse, MAX_SESSION_HOURS, MessageResponse, NominationInfo, RecordInfo,
    RecordRequest, RecordResponse, RosterConfig, StatsResponse, SubmitLeaveRequest,
    SubmitLeaveResponse, UpdateEmployeeRequest, approve_leave, change_password, create_employee,
    create_record, delete_employee, delete_leave, delete_record, get_stats, list_activity,
    list_employees, list_leaves, list_records, login, logout, rank_nominations, reject_leave,
    submit_leave, update_employee, update_record, whoami,
};
use shift_roster_domain::RecordKind;
use shift_roster_persistence::Persistence;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::macros::date;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::session::SessionEmployee;

/// Shift Roster Server - HTTP server for leave, course, and mandate rostering
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ROSTER_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "ROSTER_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "ROSTER_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Annual leave days granted to newly created employees
    #[arg(long, env = "ROSTER_DEFAULT_LEAVE_ALLOTMENT", default_value_t = DEFAULT_LEAVE_ALLOTMENT)]
    default_leave_allotment: u16,

    /// Session lifetime in hours
    #[arg(
        long,
        env = "ROSTER_SESSION_HOURS",
        default_value_t = DEFAULT_SESSION_HOURS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_HOURS)
    )]
    session_hours: i64,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Initial password for the `admin` account created on first start
    #[arg(long, env = "ROSTER_BOOTSTRAP_ADMIN_PASSWORD", default_value = "admin123")]
    bootstrap_admin_password: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Settings fixed at startup.
    config: RosterConfig,
}

/// Query parameters for nomination rankings.
#[derive(Debug, Default, Deserialize)]
struct NominationQuery {
    /// Optional role filter (`supervisor` or `operator`).
    role: Option<String>,
}

/// Query parameters for the activity log.
#[derive(Debug, Default, Deserialize)]
struct ActivityQuery {
    /// Maximum entries to return.
    limit: Option<i64>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Authentication
// ============================================================================

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &app_state.config, req)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, token): SessionEmployee,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = logout(&mut persistence, &token, &actor)?;
    Ok(Json(response))
}

async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeInfo = whoami(&mut persistence, &actor)?;
    Ok(Json(response))
}

async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = change_password(&mut persistence, &actor, req)?;
    Ok(Json(response))
}

// ============================================================================
// Employees
// ============================================================================

async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
) -> Result<Json<Vec<EmployeeInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<EmployeeInfo> = list_employees(&mut persistence, &actor)?;
    Ok(Json(response))
}

async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse =
        create_employee(&mut persistence, &app_state.config, &actor, req)?;
    Ok(Json(response))
}

async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse = update_employee(&mut persistence, &actor, employee_id, req)?;
    Ok(Json(response))
}

async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Path(employee_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = delete_employee(&mut persistence, &actor, employee_id)?;
    Ok(Json(response))
}

// ============================================================================
// Leave
// ============================================================================

async fn handle_list_leaves(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
) -> Result<Json<Vec<LeaveInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<LeaveInfo> = list_leaves(&mut persistence, &actor)?;
    Ok(Json(response))
}

async fn handle_submit_leave(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Json(req): Json<SubmitLeaveRequest>,
) -> Result<Json<SubmitLeaveResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitLeaveResponse = submit_leave(&mut persistence, &actor, req)?;
    Ok(Json(response))
}

async fn handle_approve_leave(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Path(leave_id): Path<i64>,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveDecisionResponse = approve_leave(&mut persistence, &actor, leave_id)?;
    Ok(Json(response))
}

async fn handle_reject_leave(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Path(leave_id): Path<i64>,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveDecisionResponse = reject_leave(&mut persistence, &actor, leave_id)?;
    Ok(Json(response))
}

async fn handle_delete_leave(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Path(leave_id): Path<i64>,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveDecisionResponse = delete_leave(&mut persistence, &actor, leave_id)?;
    Ok(Json(response))
}

// ============================================================================
// Courses and mandates
// ============================================================================

async fn handle_list_records(
    app_state: AppState,
    actor: SessionEmployee,
    kind: RecordKind,
) -> Result<Json<Vec<RecordInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<RecordInfo> = list_records(&mut persistence, &actor.0, kind)?;
    Ok(Json(response))
}

async fn handle_rank_nominations(
    app_state: AppState,
    actor: SessionEmployee,
    query: NominationQuery,
    kind: RecordKind,
) -> Result<Json<Vec<NominationInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<NominationInfo> =
        rank_nominations(&mut persistence, &actor.0, kind, query.role.as_deref())?;
    Ok(Json(response))
}

async fn handle_create_record(
    app_state: AppState,
    actor: SessionEmployee,
    req: RecordRequest,
    kind: RecordKind,
) -> Result<Json<RecordResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RecordResponse = create_record(&mut persistence, &actor.0, kind, req)?;
    Ok(Json(response))
}

async fn handle_update_record(
    app_state: AppState,
    actor: SessionEmployee,
    record_id: i64,
    req: RecordRequest,
    kind: RecordKind,
) -> Result<Json<RecordResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RecordResponse =
        update_record(&mut persistence, &actor.0, kind, record_id, req)?;
    Ok(Json(response))
}

async fn handle_delete_record(
    app_state: AppState,
    actor: SessionEmployee,
    record_id: i64,
    kind: RecordKind,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = delete_record(&mut persistence, &actor.0, kind, record_id)?;
    Ok(Json(response))
}

/// Adds the course or mandate endpoints under `base`.
fn record_routes(router: Router<AppState>, base: &str, kind: RecordKind) -> Router<AppState> {
    router
        .route(
            base,
            get(
                move |AxumState(app_state): AxumState<AppState>, actor: SessionEmployee| {
                    handle_list_records(app_state, actor, kind)
                },
            )
            .post(
                move |AxumState(app_state): AxumState<AppState>,
                      actor: SessionEmployee,
                      Json(req): Json<RecordRequest>| {
                    handle_create_record(app_state, actor, req, kind)
                },
            ),
        )
        .route(
            &format!("{base}/nominations"),
            get(
                move |AxumState(app_state): AxumState<AppState>,
                      actor: SessionEmployee,
                      Query(query): Query<NominationQuery>| {
                    handle_rank_nominations(app_state, actor, query, kind)
                },
            ),
        )
        .route(
            &format!("{base}/{{id}}"),
            put(
                move |AxumState(app_state): AxumState<AppState>,
                      actor: SessionEmployee,
                      Path(record_id): Path<i64>,
                      Json(req): Json<RecordRequest>| {
                    handle_update_record(app_state, actor, record_id, req, kind)
                },
            )
            .delete(
                move |AxumState(app_state): AxumState<AppState>,
                      actor: SessionEmployee,
                      Path(record_id): Path<i64>| {
                    handle_delete_record(app_state, actor, record_id, kind)
                },
            ),
        )
}

// ============================================================================
// Dashboard and activity
// ============================================================================

async fn handle_get_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
) -> Result<Json<StatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: StatsResponse = get_stats(&mut persistence, &actor)?;
    Ok(Json(response))
}

async fn handle_list_activity(
    AxumState(app_state): AxumState<AppState>,
    SessionEmployee(actor, _): SessionEmployee,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<ActivityInfo> = list_activity(&mut persistence, &actor, query.limit)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let router: Router<AppState> = Router::new()
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/me", get(handle_whoami))
        .route("/api/auth/change-password", post(handle_change_password))
        .route(
            "/api/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route(
            "/api/employees/{id}",
            put(handle_update_employee).delete(handle_delete_employee),
        )
        .route(
            "/api/leaves",
            get(handle_list_leaves).post(handle_submit_leave),
        )
        .route("/api/leaves/{id}/approve", put(handle_approve_leave))
        .route("/api/leaves/{id}/reject", put(handle_reject_leave))
        .route("/api/leaves/{id}", axum::routing::delete(handle_delete_leave))
        .route("/api/stats", get(handle_get_stats))
        .route("/api/stats/activity", get(handle_list_activity));

    let router: Router<AppState> = record_routes(router, "/api/courses", RecordKind::Course);
    let router: Router<AppState> = record_routes(router, "/api/mandates", RecordKind::Mandate);

    router.with_state(app_state)
}

/// Creates the `admin` manager on an empty roster.
fn bootstrap_admin(
    persistence: &mut Persistence,
    password: &str,
    allotment: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    match persistence.bootstrap_manager(
        "Administrator",
        "admin",
        password,
        date!(2020 - 01 - 01),
        u32::from(allotment),
    )? {
        Some(employee_id) => {
            warn!(
                employee_id,
                "Created default manager 'admin'; change its password after first login"
            );
        }
        None => debug!("Manager account already present; skipping bootstrap"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing Shift Roster Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    bootstrap_admin(
        &mut persistence,
        &args.bootstrap_admin_password,
        args.default_leave_allotment,
    )?;

    let config: RosterConfig = RosterConfig::new(args.default_leave_allotment, args.session_hours);
    info!(
        default_leave_allotment = config.default_leave_allotment,
        session_hours = args.session_hours,
        "Roster configuration loaded"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
