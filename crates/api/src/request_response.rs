// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Dates travel as ISO `YYYY-MM-DD`
//! strings. Request fields the handlers must validate are optional here so a
//! missing field is reported as invalid input rather than a decode failure.

use serde::{Deserialize, Serialize};
use shift_roster_audit::AuditEvent;
use shift_roster_domain::{
    AssignmentView, Employee, LeaveView, NominationPosition, format_date,
};
use shift_roster_persistence::{DashboardStats, ShiftCount};

// ============================================================================
// Authentication
// ============================================================================

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// The login name.
    pub username: Option<String>,
    /// The plaintext password.
    pub password: Option<String>,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The bearer token for subsequent requests.
    pub token: String,
    /// When the session expires (ISO 8601).
    pub expires_at: String,
    /// The logged-in employee.
    pub employee: EmployeeInfo,
}

/// API request to change the caller's own password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The password currently in use.
    pub current_password: Option<String>,
    /// The replacement password.
    pub new_password: Option<String>,
}

/// A plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// A success message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Employees
// ============================================================================

/// Employee profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    /// The employee's identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// `manager`, `supervisor`, or `operator`.
    pub role: String,
    /// `A` through `D`; absent for managers.
    pub shift: Option<String>,
    /// Date the employee joined.
    pub join_date: String,
    /// Remaining annual leave days.
    pub annual_leave_balance: u32,
}

impl EmployeeInfo {
    /// Builds the API view of a persisted employee.
    ///
    /// Unpersisted employees are reported with ID 0.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.employee_id.unwrap_or_default(),
            name: employee.name.clone(),
            username: employee.username.clone(),
            role: employee.role.to_string(),
            shift: employee.shift.map(|s| s.to_string()),
            join_date: format_date(employee.join_date),
            annual_leave_balance: employee.annual_leave_balance,
        }
    }
}

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Display name.
    pub name: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Initial password.
    pub password: Option<String>,
    /// `manager`, `supervisor`, or `operator`.
    pub role: Option<String>,
    /// Shift letter; required unless the role is manager.
    pub shift: Option<String>,
    /// Date the employee joined.
    pub join_date: Option<String>,
}

/// API request to update an employee. The leave balance is not editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    /// Display name.
    pub name: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Replacement password; unchanged when absent or blank.
    pub password: Option<String>,
    /// `manager`, `supervisor`, or `operator`.
    pub role: Option<String>,
    /// Shift letter; required unless the role is manager.
    pub shift: Option<String>,
    /// Date the employee joined.
    pub join_date: Option<String>,
}

/// API response for a created or updated employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    /// The employee after the change.
    pub employee: EmployeeInfo,
    /// A success message.
    pub message: String,
}

// ============================================================================
// Leave
// ============================================================================

/// API request to submit leave for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveRequest {
    /// First day of leave.
    pub start_date: Option<String>,
    /// Last day of leave, inclusive.
    pub end_date: Option<String>,
}

/// API response for a submitted leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveResponse {
    /// The new request's identifier.
    pub id: i64,
    /// Number of calendar days requested.
    pub days: u32,
    /// Always `pending` for a new request.
    pub status: String,
    /// The audit event recorded for the submission.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for an approve, reject, or delete decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDecisionResponse {
    /// The request acted upon.
    pub id: i64,
    /// The new status; absent after deletion.
    pub status: Option<String>,
    /// The owner's balance after the decision.
    pub annual_leave_balance: u32,
    /// The audit event recorded for the decision.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// Leave request annotated with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveInfo {
    /// The request's identifier.
    pub id: i64,
    /// The owning employee.
    pub employee_id: i64,
    /// The owner's display name.
    pub employee_name: String,
    /// The owner's role.
    pub role: String,
    /// The owner's shift.
    pub shift: Option<String>,
    /// First day of leave.
    pub start_date: String,
    /// Last day of leave, inclusive.
    pub end_date: String,
    /// Number of calendar days.
    pub days: u32,
    /// `pending`, `approved`, or `rejected`.
    pub status: String,
    /// When the request was submitted.
    pub created_at: Option<String>,
}

impl LeaveInfo {
    /// Builds the API view of a leave row.
    #[must_use]
    pub fn from_view(view: &LeaveView) -> Self {
        Self {
            id: view.leave.leave_id.unwrap_or_default(),
            employee_id: view.owner.employee_id,
            employee_name: view.owner.name.clone(),
            role: view.owner.role.to_string(),
            shift: view.owner.shift.map(|s| s.to_string()),
            start_date: format_date(view.leave.range.start()),
            end_date: format_date(view.leave.range.end()),
            days: view.leave.days(),
            status: view.leave.status.to_string(),
            created_at: view.leave.created_at.clone(),
        }
    }
}

// ============================================================================
// Courses and mandates
// ============================================================================

/// API request to create or replace a course or mandate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    /// Course or mandate title.
    pub title: Option<String>,
    /// Where it takes place.
    pub location: Option<String>,
    /// When it takes place.
    pub date: Option<String>,
    /// The assigned employee.
    pub employee_id: Option<i64>,
}

/// API response for a created or updated course or mandate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    /// The record's identifier.
    pub id: i64,
    /// A success message.
    pub message: String,
}

/// Course or mandate annotated with its assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInfo {
    /// The record's identifier.
    pub id: i64,
    /// `course` or `mandate`.
    pub kind: String,
    /// Title.
    pub title: String,
    /// Location.
    pub location: String,
    /// Date.
    pub date: String,
    /// The assigned employee.
    pub employee_id: i64,
    /// The assignee's display name.
    pub employee_name: String,
    /// The assignee's role.
    pub role: String,
    /// The assignee's shift.
    pub shift: Option<String>,
}

impl RecordInfo {
    /// Builds the API view of an assignment row.
    #[must_use]
    pub fn from_view(view: &AssignmentView) -> Self {
        Self {
            id: view.record.record_id.unwrap_or_default(),
            kind: view.record.kind.to_string(),
            title: view.record.title.clone(),
            location: view.record.location.clone(),
            date: format_date(view.record.date),
            employee_id: view.owner.employee_id,
            employee_name: view.owner.name.clone(),
            role: view.owner.role.to_string(),
            shift: view.owner.shift.map(|s| s.to_string()),
        }
    }
}

/// One ranked nomination candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationInfo {
    /// 1-based rank; 1 is most entitled.
    pub position: usize,
    /// The candidate.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: String,
    /// Shift.
    pub shift: Option<String>,
    /// Date the candidate joined.
    pub join_date: String,
    /// Most recent record of the ranked kind, if any.
    pub last_date: Option<String>,
}

impl NominationInfo {
    /// Builds the API view of a ranked candidate.
    #[must_use]
    pub fn from_position(position: &NominationPosition) -> Self {
        let candidate = &position.candidate;
        Self {
            position: position.position,
            employee_id: candidate.employee_id,
            name: candidate.name.clone(),
            role: candidate.role.to_string(),
            shift: candidate.shift.map(|s| s.to_string()),
            join_date: format_date(candidate.join_date),
            last_date: candidate.last_record_date.map(format_date),
        }
    }
}

// ============================================================================
// Dashboard and activity
// ============================================================================

/// Head count for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCountInfo {
    /// Shift letter.
    pub shift: String,
    /// Non-manager employees on the shift.
    pub count: i64,
}

impl From<&ShiftCount> for ShiftCountInfo {
    fn from(count: &ShiftCount) -> Self {
        Self {
            shift: count.shift.to_string(),
            count: count.count,
        }
    }
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// All employees, managers included.
    pub total_employees: i64,
    /// Supervisors.
    pub supervisors: i64,
    /// Operators.
    pub operators: i64,
    /// Leave requests awaiting a decision.
    pub pending_leaves: i64,
    /// Approved leave requests.
    pub approved_leaves: i64,
    /// Courses on record.
    pub total_courses: i64,
    /// Mandates on record.
    pub total_mandates: i64,
    /// Non-manager head count per shift.
    pub by_shift: Vec<ShiftCountInfo>,
    /// The most recently submitted leave requests.
    pub recent_leaves: Vec<LeaveInfo>,
}

impl From<&DashboardStats> for StatsResponse {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_employees: stats.total_employees,
            supervisors: stats.supervisors,
            operators: stats.operators,
            pending_leaves: stats.pending_leaves,
            approved_leaves: stats.approved_leaves,
            total_courses: stats.total_courses,
            total_mandates: stats.total_mandates,
            by_shift: stats.by_shift.iter().map(ShiftCountInfo::from).collect(),
            recent_leaves: stats.recent_leaves.iter().map(LeaveInfo::from_view).collect(),
        }
    }
}

/// One activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInfo {
    /// The event's identifier.
    pub id: i64,
    /// The acting employee; absent once that employee is deleted.
    pub actor_id: Option<i64>,
    /// The acting employee's name at the time.
    pub actor_name: String,
    /// What was done.
    pub action: String,
    /// Free-form details.
    pub details: Option<String>,
    /// The kind of entity changed.
    pub target_type: String,
    /// The entity changed.
    pub target_name: Option<String>,
    /// When it happened.
    pub created_at: Option<String>,
}

impl From<&AuditEvent> for ActivityInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            id: event.event_id.unwrap_or_default(),
            actor_id: event.actor.employee_id,
            actor_name: event.actor.name.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            target_type: event.target.target_type.clone(),
            target_name: event.target.target_name.clone(),
            created_at: event.created_at.clone(),
        }
    }
}
