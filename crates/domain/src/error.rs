// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::leave_lifecycle::LeaveAction;
use crate::types::{LeaveStatus, RecordKind, Role};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// Username is empty or invalid.
    InvalidUsername(String),
    /// Role string is not one of the three known roles.
    InvalidRole(String),
    /// Shift string is not one of the four known shifts.
    InvalidShift(String),
    /// Supervisors and operators must belong to a shift.
    MissingShift {
        /// The role that requires a shift.
        role: Role,
    },
    /// Leave status string is not recognized.
    InvalidLeaveStatus(String),
    /// Record kind string is not recognized.
    InvalidRecordKind(String),
    /// A course or mandate field is empty or invalid.
    InvalidRecordField {
        /// The offending field.
        field: &'static str,
        /// Why the field was rejected.
        reason: String,
    },
    /// A required date was not supplied.
    MissingDate {
        /// The field that was missing.
        field: &'static str,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The field being parsed.
        field: &'static str,
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The end date precedes the start date.
    InvalidDateRange {
        /// The requested first day.
        start_date: time::Date,
        /// The requested last day.
        end_date: time::Date,
    },
    /// The employee's balance cannot cover the requested days.
    InsufficientBalance {
        /// Days currently available.
        available: u32,
        /// Days requested.
        requested: u32,
    },
    /// The requested lifecycle action is not permitted from the current status.
    InvalidTransition {
        /// The leave request being acted upon.
        leave_id: Option<i64>,
        /// The current status.
        from: LeaveStatus,
        /// The attempted action.
        action: LeaveAction,
    },
    /// Leave request does not exist.
    LeaveNotFound(i64),
    /// Employee does not exist.
    EmployeeNotFound(i64),
    /// Course or mandate does not exist.
    RecordNotFound {
        /// The kind of record.
        kind: RecordKind,
        /// The record identifier.
        record_id: i64,
    },
    /// Username is already taken by another employee.
    DuplicateUsername(String),
    /// Manager accounts are never deleted.
    ManagerNotDeletable(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidShift(msg) => write!(f, "Invalid shift: {msg}"),
            Self::MissingShift { role } => {
                write!(f, "A shift is required for role '{role}'")
            }
            Self::InvalidLeaveStatus(msg) => write!(f, "Invalid leave status: {msg}"),
            Self::InvalidRecordKind(msg) => write!(f, "Invalid record kind: {msg}"),
            Self::InvalidRecordField { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::MissingDate { field } => write!(f, "Missing required date '{field}'"),
            Self::DateParseError {
                field,
                date_string,
                error,
            } => {
                write!(f, "Failed to parse {field} '{date_string}': {error}")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date {end_date} must not be before start date {start_date}"
                )
            }
            Self::InsufficientBalance {
                available,
                requested,
            } => {
                write!(
                    f,
                    "Insufficient leave balance: {available} days available, {requested} days requested"
                )
            }
            Self::InvalidTransition {
                leave_id,
                from,
                action,
            } => match leave_id {
                Some(id) => write!(
                    f,
                    "Cannot {action} leave request {id}: request is already {from}"
                ),
                None => write!(f, "Cannot {action} a leave request that is {from}"),
            },
            Self::LeaveNotFound(id) => write!(f, "Leave request {id} not found"),
            Self::EmployeeNotFound(id) => write!(f, "Employee {id} not found"),
            Self::RecordNotFound { kind, record_id } => {
                write!(f, "{} {record_id} not found", kind.display_name())
            }
            Self::DuplicateUsername(username) => {
                write!(f, "Username '{username}' is already in use")
            }
            Self::ManagerNotDeletable(id) => {
                write!(f, "Employee {id} is a manager and cannot be deleted")
            }
        }
    }
}

impl std::error::Error for DomainError {}
