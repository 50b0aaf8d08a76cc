// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers.
//!
//! Each handler authorizes the caller, validates input, runs the pure core
//! where a leave transition is involved, and commits the change together with
//! its audit event through the persistence layer.

use std::str::FromStr;

use shift_roster::{Command, LeaveChange, LedgerState, TransitionResult, apply};
use shift_roster_audit::{Action, AuditEvent, Target, role_detail};
use shift_roster_domain::{
    AssignmentView, DateRange, DomainError, Employee, LeaveAction, LeaveBalance, LeaveRequest,
    LeaveView, NominableRecord, NominationCandidate, NominationPosition, RecordKind, Role, Shift,
    format_date, parse_leave_range, parse_required_date, rank_nominees, scope_rows,
    validate_employee_fields, validate_record_fields,
};
use shift_roster_persistence::{
    DashboardStats, EmployeeData, EmployeeUpdate, PersistLeaveResult, Persistence,
};
use time::Date;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::config::RosterConfig;
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    ActivityInfo, ChangePasswordRequest, CreateEmployeeRequest, EmployeeInfo, EmployeeResponse,
    LeaveDecisionResponse, LeaveInfo, LoginRequest, LoginResponse, MessageResponse,
    NominationInfo, RecordInfo, RecordRequest, RecordResponse, StatsResponse,
    SubmitLeaveRequest, SubmitLeaveResponse, UpdateEmployeeRequest,
};

/// Number of activity entries returned when no limit is given.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;

// ============================================================================
// Authentication
// ============================================================================

/// Authenticates an employee and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - Runtime settings (session lifetime)
/// * `request` - The login request
///
/// # Errors
///
/// Returns an error if:
/// - The username or password is missing
/// - The credentials are wrong
/// - Database operations fail
pub fn login(
    persistence: &mut Persistence,
    config: &RosterConfig,
    request: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let username: String = required("username", request.username)?;
    let password: String = required("password", request.password)?;

    let (token, actor, expires_at): (String, AuthenticatedActor, String) =
        AuthenticationService::login(persistence, &username, &password, config.session_duration)?;

    let data: EmployeeData = load_employee(persistence, actor.employee_id())?;

    Ok(LoginResponse {
        token,
        expires_at,
        employee: EmployeeInfo::from_employee(&data.employee),
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the session does not exist.
pub fn logout(
    persistence: &mut Persistence,
    session_token: &str,
    actor: &AuthenticatedActor,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token, actor)?;
    Ok(MessageResponse::new("Logged out"))
}

/// Returns the caller's profile with their live leave balance.
///
/// # Errors
///
/// Returns an error if the caller's employee row has been removed.
pub fn whoami(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<EmployeeInfo, ApiError> {
    let data: EmployeeData = load_employee(persistence, actor.employee_id())?;
    Ok(EmployeeInfo::from_employee(&data.employee))
}

/// Changes the caller's own password.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated caller
/// * `request` - Current and replacement passwords
///
/// # Errors
///
/// Returns an error if:
/// - Either password is missing
/// - The new password violates the password policy
/// - The current password is incorrect
/// - Database operations fail
pub fn change_password(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: ChangePasswordRequest,
) -> Result<MessageResponse, ApiError> {
    let current_password: String = required("current_password", request.current_password)?;
    let new_password: String = required("new_password", request.new_password)?;

    PasswordPolicy::default().validate(&new_password)?;

    let data: EmployeeData = load_employee(persistence, actor.employee_id())?;
    let password_valid: bool =
        Persistence::verify_password(&current_password, &data.password_hash)
            .map_err(translate_persistence_error)?;
    if !password_valid {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        });
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        Action::new(String::from("ChangePassword"), None),
        Target::employee(&data.employee),
    );
    persistence
        .update_password(actor.employee_id(), &new_password, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(employee_id = actor.employee_id(), "Password changed");
    Ok(MessageResponse::new("Password changed"))
}

// ============================================================================
// Employees
// ============================================================================

/// Lists every employee in roster order.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_employees(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<EmployeeInfo>, ApiError> {
    AuthorizationService::authorize_manage_employees(actor)?;

    let employees: Vec<Employee> = persistence
        .list_employees()
        .map_err(translate_persistence_error)?;
    Ok(employees.iter().map(EmployeeInfo::from_employee).collect())
}

/// Creates an employee holding the configured leave allotment.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - Runtime settings (default allotment)
/// * `actor` - The authenticated caller
/// * `request` - The new employee's fields
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - A required field is missing or malformed
/// - A supervisor or operator has no shift
/// - The username is taken
pub fn create_employee(
    persistence: &mut Persistence,
    config: &RosterConfig,
    actor: &AuthenticatedActor,
    request: CreateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(actor)?;

    let name: String = required("name", request.name)?;
    let username: String = required("username", request.username)?;
    let password: String = required("password", request.password)?;
    let role: Role = parse_role(request.role)?;
    let shift: Option<Shift> = parse_shift(request.shift)?;
    let join_date: Date = parse_required_date("join_date", request.join_date.as_deref())
        .map_err(translate_domain_error)?;

    PasswordPolicy::default().validate(&password)?;

    let mut employee: Employee = Employee::new(
        name,
        username,
        role,
        shift,
        join_date,
        u32::from(config.default_leave_allotment),
    );
    validate_employee_fields(&employee).map_err(translate_domain_error)?;

    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        Action::new(
            String::from("CreateEmployee"),
            Some(describe_assignment(role, employee.shift)),
        ),
        Target::employee(&employee),
    );

    let employee_id: i64 = persistence
        .create_employee(&employee, &password, &audit_event)
        .map_err(translate_persistence_error)?;
    employee.employee_id = Some(employee_id);

    info!(employee_id, role = %role, "Employee created");

    Ok(EmployeeResponse {
        employee: EmployeeInfo::from_employee(&employee),
        message: format!("Created employee {}", employee.name),
    })
}

/// Updates an employee's profile and, optionally, their password.
///
/// The leave balance is never changed here.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The employee does not exist
/// - A required field is missing or malformed
/// - The new username belongs to someone else
pub fn update_employee(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    employee_id: i64,
    request: UpdateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(actor)?;

    let name: String = required("name", request.name)?;
    let username: String = required("username", request.username)?;
    let role: Role = parse_role(request.role)?;
    let shift: Option<Shift> = parse_shift(request.shift)?;
    let join_date: Date = parse_required_date("join_date", request.join_date.as_deref())
        .map_err(translate_domain_error)?;
    let password: Option<String> = request.password.filter(|p| !p.trim().is_empty());
    if let Some(password) = &password {
        PasswordPolicy::default().validate(password)?;
    }

    let existing: EmployeeData = load_employee(persistence, employee_id)?;

    let updated: Employee = Employee::with_id(
        employee_id,
        name,
        username,
        role,
        if role.requires_shift() { shift } else { None },
        join_date,
        existing.employee.annual_leave_balance,
    );
    validate_employee_fields(&updated).map_err(translate_domain_error)?;

    let update: EmployeeUpdate = EmployeeUpdate {
        name: updated.name.clone(),
        username: updated.username.clone(),
        role: updated.role,
        shift: updated.shift,
        join_date: updated.join_date,
        password,
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        Action::new(
            String::from("UpdateEmployee"),
            Some(describe_assignment(role, updated.shift)),
        ),
        Target::employee(&updated),
    );

    persistence
        .update_employee(employee_id, &update, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(employee_id, "Employee updated");

    Ok(EmployeeResponse {
        employee: EmployeeInfo::from_employee(&updated),
        message: format!("Updated employee {}", updated.name),
    })
}

/// Deletes an employee and everything they own.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The employee does not exist
/// - The employee is a manager
pub fn delete_employee(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    employee_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_employees(actor)?;

    let existing: EmployeeData = load_employee(persistence, employee_id)?;
    if existing.employee.role == Role::Manager {
        return Err(translate_domain_error(DomainError::ManagerNotDeletable(
            employee_id,
        )));
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        Action::new(
            String::from("DeleteEmployee"),
            Some(describe_assignment(
                existing.employee.role,
                existing.employee.shift,
            )),
        ),
        Target::employee(&existing.employee),
    );

    persistence
        .delete_employee(employee_id, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(employee_id, "Employee deleted");
    Ok(MessageResponse::new(format!(
        "Deleted employee {}",
        existing.employee.name
    )))
}

// ============================================================================
// Leave
// ============================================================================

/// Lists the leave requests visible to the caller, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_leaves(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<LeaveInfo>, ApiError> {
    let rows: Vec<LeaveView> = persistence
        .list_leave_views()
        .map_err(translate_persistence_error)?;
    let visible: Vec<LeaveView> = scope_rows(&actor.principal, rows);
    Ok(visible.iter().map(LeaveInfo::from_view).collect())
}

/// Submits a leave request for the caller.
///
/// The request is created pending; the balance is only checked, never
/// reserved.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is a manager
/// - A date is missing or malformed, or the end precedes the start
/// - The requested days exceed the caller's current balance
pub fn submit_leave(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: SubmitLeaveRequest,
) -> Result<SubmitLeaveResponse, ApiError> {
    AuthorizationService::authorize_submit_leave(actor)?;

    let range: DateRange = parse_leave_range(
        request.start_date.as_deref(),
        request.end_date.as_deref(),
    )
    .map_err(translate_domain_error)?;

    let balance: u32 = persistence
        .get_leave_balance(actor.employee_id())
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::EmployeeNotFound(actor.employee_id())))?;

    let state: LedgerState = LedgerState::new(
        actor.employee_id(),
        actor.name.clone(),
        LeaveBalance::new(balance),
    );
    let result: TransitionResult = apply(
        &state,
        Command::SubmitLeave { range },
        actor.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistLeaveResult = persistence
        .persist_leave_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        leave_id = persisted.leave_id,
        employee_id = actor.employee_id(),
        days = range.days(),
        "Leave submitted"
    );

    Ok(SubmitLeaveResponse {
        id: persisted.leave_id,
        days: range.days(),
        status: String::from("pending"),
        event_id: persisted.event_id,
        message: format!(
            "Leave requested from {} to {}",
            format_date(range.start()),
            format_date(range.end())
        ),
    })
}

/// Approves a pending leave request, debiting its days from the owner.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The request does not exist
/// - The request is not pending
/// - The owner's balance cannot cover the request
pub fn approve_leave(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    leave_id: i64,
) -> Result<LeaveDecisionResponse, ApiError> {
    decide_leave(persistence, actor, leave_id, LeaveAction::Approve)
}

/// Rejects a leave request, refunding it if it was approved.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the request does not
/// exist.
pub fn reject_leave(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    leave_id: i64,
) -> Result<LeaveDecisionResponse, ApiError> {
    decide_leave(persistence, actor, leave_id, LeaveAction::Reject)
}

/// Deletes a leave request, refunding it if it was approved.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the request does not
/// exist.
pub fn delete_leave(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    leave_id: i64,
) -> Result<LeaveDecisionResponse, ApiError> {
    decide_leave(persistence, actor, leave_id, LeaveAction::Delete)
}

fn decide_leave(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    leave_id: i64,
    action: LeaveAction,
) -> Result<LeaveDecisionResponse, ApiError> {
    AuthorizationService::authorize_decide_leave(actor)?;

    let leave: LeaveRequest = persistence
        .get_leave_by_id(leave_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::LeaveNotFound(leave_id)))?;
    let owner: EmployeeData = load_employee(persistence, leave.employee_id)?;
    let owner_id: i64 = owner.employee_id();

    let state: LedgerState = LedgerState::with_leave(
        owner_id,
        owner.employee.name,
        LeaveBalance::new(owner.employee.annual_leave_balance),
        leave,
    );
    let command: Command = Command::decision(action, leave_id);

    let result: TransitionResult =
        apply(&state, command, actor.to_audit_actor()).map_err(translate_core_error)?;

    let persisted: PersistLeaveResult = persistence
        .persist_leave_transition(&result)
        .map_err(translate_persistence_error)?;

    let annual_leave_balance: u32 = persistence
        .get_leave_balance(owner_id)
        .map_err(translate_persistence_error)?
        .unwrap_or_else(|| result.new_state.balance.days());

    let status: Option<String> = match &result.change {
        LeaveChange::StatusChanged { to, .. } => Some(to.to_string()),
        LeaveChange::Created(_) | LeaveChange::Deleted { .. } => None,
    };

    info!(
        leave_id,
        employee_id = owner_id,
        action = action.as_str(),
        delta = result.ledger_effect.delta(),
        balance = annual_leave_balance,
        "Leave decided"
    );

    Ok(LeaveDecisionResponse {
        id: leave_id,
        status,
        annual_leave_balance,
        event_id: persisted.event_id,
        message: match action {
            LeaveAction::Approve => String::from("Leave request approved"),
            LeaveAction::Reject => String::from("Leave request rejected"),
            LeaveAction::Delete => String::from("Leave request deleted"),
        },
    })
}

// ============================================================================
// Courses and mandates
// ============================================================================

/// Lists the courses or mandates visible to the caller, latest date first.
///
/// Non-managers only ever see their own assignments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_records(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    kind: RecordKind,
) -> Result<Vec<RecordInfo>, ApiError> {
    let rows: Vec<AssignmentView> = persistence
        .list_assignment_views(kind)
        .map_err(translate_persistence_error)?;
    let visible: Vec<AssignmentView> = scope_rows(&actor.principal, rows);
    Ok(visible.iter().map(RecordInfo::from_view).collect())
}

/// Ranks non-manager employees for nomination to the next course or mandate.
///
/// `role_filter` narrows the pool to `supervisor` or `operator`; any other
/// value is ignored.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn rank_nominations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    kind: RecordKind,
    role_filter: Option<&str>,
) -> Result<Vec<NominationInfo>, ApiError> {
    AuthorizationService::authorize_view_nominations(actor)?;

    let pool: Vec<NominationCandidate> = persistence
        .list_nomination_candidates(kind)
        .map_err(translate_persistence_error)?;
    let ranked: Vec<NominationPosition> = rank_nominees(pool, parse_role_filter(role_filter));

    debug!(kind = kind.as_str(), candidates = ranked.len(), "Ranked nominees");
    Ok(ranked.iter().map(NominationInfo::from_position).collect())
}

/// Assigns a new course or mandate to an employee.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - A field is missing or malformed
/// - The employee does not exist
pub fn create_record(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    kind: RecordKind,
    request: RecordRequest,
) -> Result<RecordResponse, ApiError> {
    AuthorizationService::authorize_manage_records(actor)?;

    let (record, assignee): (NominableRecord, Employee) =
        build_record(persistence, kind, request)?;
    let audit_event: AuditEvent = record_event(actor, "Create", &record, &assignee);

    let record_id: i64 = persistence
        .create_record(&record, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(record_id, kind = kind.as_str(), employee_id = record.employee_id, "Record created");

    Ok(RecordResponse {
        id: record_id,
        message: format!("{} assigned to {}", kind.display_name(), assignee.name),
    })
}

/// Replaces every field of a course or mandate.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - The record does not exist
/// - A field is missing or malformed
/// - The employee does not exist
pub fn update_record(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    kind: RecordKind,
    record_id: i64,
    request: RecordRequest,
) -> Result<RecordResponse, ApiError> {
    AuthorizationService::authorize_manage_records(actor)?;

    load_record(persistence, kind, record_id)?;
    let (record, assignee): (NominableRecord, Employee) =
        build_record(persistence, kind, request)?;
    let audit_event: AuditEvent = record_event(actor, "Update", &record, &assignee);

    persistence
        .update_record(record_id, &record, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(record_id, kind = kind.as_str(), "Record updated");

    Ok(RecordResponse {
        id: record_id,
        message: format!("{} updated", kind.display_name()),
    })
}

/// Deletes a course or mandate.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the record does not
/// exist.
pub fn delete_record(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    kind: RecordKind,
    record_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_records(actor)?;

    let record: NominableRecord = load_record(persistence, kind, record_id)?;
    let assignee: EmployeeData = load_employee(persistence, record.employee_id)?;
    let audit_event: AuditEvent = record_event(actor, "Delete", &record, &assignee.employee);

    persistence
        .delete_record(kind, record_id, &audit_event)
        .map_err(translate_persistence_error)?;

    info!(record_id, kind = kind.as_str(), "Record deleted");
    Ok(MessageResponse::new(format!("{} deleted", kind.display_name())))
}

// ============================================================================
// Dashboard and activity
// ============================================================================

/// Returns the dashboard figures.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn get_stats(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<StatsResponse, ApiError> {
    AuthorizationService::authorize_view_stats(actor)?;

    let stats: DashboardStats = persistence
        .dashboard_stats()
        .map_err(translate_persistence_error)?;
    Ok(StatsResponse::from(&stats))
}

/// Lists the newest activity log entries.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated caller
/// * `limit` - Maximum entries to return; defaults to [`DEFAULT_ACTIVITY_LIMIT`]
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the limit is not
/// positive, or the query fails.
pub fn list_activity(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    limit: Option<i64>,
) -> Result<Vec<ActivityInfo>, ApiError> {
    AuthorizationService::authorize_view_stats(actor)?;

    let limit: i64 = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    if limit < 1 {
        return Err(ApiError::InvalidInput {
            field: String::from("limit"),
            message: format!("Limit must be positive, got {limit}"),
        });
    }

    let events: Vec<AuditEvent> = persistence
        .list_activity(limit)
        .map_err(translate_persistence_error)?;
    Ok(events.iter().map(ActivityInfo::from).collect())
}

// ============================================================================
// Helpers
// ============================================================================

fn required(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} is required"),
        }),
    }
}

fn parse_role(value: Option<String>) -> Result<Role, ApiError> {
    let value: String = required("role", value)?;
    Role::from_str(&value).map_err(translate_domain_error)
}

fn parse_shift(value: Option<String>) -> Result<Option<Shift>, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| Shift::from_str(&v).map_err(translate_domain_error))
        .transpose()
}

fn parse_role_filter(value: Option<&str>) -> Option<Role> {
    match value {
        Some("supervisor") => Some(Role::Supervisor),
        Some("operator") => Some(Role::Operator),
        _ => None,
    }
}

fn describe_assignment(role: Role, shift: Option<Shift>) -> String {
    shift.map_or_else(
        || role_detail(role),
        |shift| format!("{}, shift: {shift}", role_detail(role)),
    )
}

fn load_employee(persistence: &mut Persistence, employee_id: i64) -> Result<EmployeeData, ApiError> {
    persistence
        .get_employee_by_id(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::EmployeeNotFound(employee_id)))
}

fn load_record(
    persistence: &mut Persistence,
    kind: RecordKind,
    record_id: i64,
) -> Result<NominableRecord, ApiError> {
    persistence
        .get_record(kind, record_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::RecordNotFound { kind, record_id }))
}

fn build_record(
    persistence: &mut Persistence,
    kind: RecordKind,
    request: RecordRequest,
) -> Result<(NominableRecord, Employee), ApiError> {
    let title: String = request.title.unwrap_or_default();
    let location: String = request.location.unwrap_or_default();
    validate_record_fields(&title, &location).map_err(translate_domain_error)?;
    let date: Date =
        parse_required_date("date", request.date.as_deref()).map_err(translate_domain_error)?;
    let employee_id: i64 = request.employee_id.ok_or_else(|| ApiError::InvalidInput {
        field: String::from("employee_id"),
        message: String::from("employee_id is required"),
    })?;

    let assignee: EmployeeData = load_employee(persistence, employee_id)?;
    let record: NominableRecord = NominableRecord::new(
        kind,
        title.trim().to_string(),
        location.trim().to_string(),
        date,
        employee_id,
    );
    Ok((record, assignee.employee))
}

fn record_event(
    actor: &AuthenticatedActor,
    verb: &str,
    record: &NominableRecord,
    assignee: &Employee,
) -> AuditEvent {
    AuditEvent::new(
        actor.to_audit_actor(),
        Action::new(
            format!("{verb}{}", record.kind.display_name()),
            Some(format!(
                "{} at {} on {} for {}",
                record.title,
                record.location,
                format_date(record.date),
                assignee.name
            )),
        ),
        Target::record(record.kind, &record.title),
    )
}
