// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Shift Roster system.
//!
//! Handlers take the persistence layer and an authenticated actor, enforce
//! role checks, validate input, and translate every lower-layer error into
//! an [`ApiError`]. Leave transitions run through the pure core before they
//! are committed.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod config;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use config::{
    DEFAULT_LEAVE_ALLOTMENT, DEFAULT_SESSION_HOURS, MAX_SESSION_HOURS, RosterConfig,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    DEFAULT_ACTIVITY_LIMIT, approve_leave, change_password, create_employee, create_record,
    delete_employee, delete_leave, delete_record, get_stats, list_activity, list_employees,
    list_leaves, list_records, login, logout, rank_nominations, reject_leave, submit_leave,
    update_employee, update_record, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    ActivityInfo, ChangePasswordRequest, CreateEmployeeRequest, EmployeeInfo, EmployeeResponse,
    LeaveDecisionResponse, LeaveInfo, LoginRequest, LoginResponse, MessageResponse,
    NominationInfo, RecordInfo, RecordRequest, RecordResponse, ShiftCountInfo, StatsResponse,
    SubmitLeaveRequest, SubmitLeaveResponse, UpdateEmployeeRequest,
};
