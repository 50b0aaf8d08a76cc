// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster_domain::{LeaveStatus, RecordKind};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A stored value could not be mapped back to a domain type.
    CorruptRow(String),
    /// The requested employee was not found.
    EmployeeNotFound(i64),
    /// The requested leave request was not found.
    LeaveNotFound(i64),
    /// The requested course or mandate was not found.
    RecordNotFound {
        /// The kind of record.
        kind: RecordKind,
        /// The record identifier.
        record_id: i64,
    },
    /// The requested session was not found.
    SessionNotFound(String),
    /// The username is already taken.
    DuplicateUsername(String),
    /// The conditional balance debit matched no row.
    InsufficientBalance {
        /// The employee whose balance was debited.
        employee_id: i64,
        /// Days available when the debit was attempted.
        available: u32,
        /// Days requested.
        requested: u32,
    },
    /// The leave request's status changed between load and commit.
    StaleLeaveStatus {
        /// The leave request.
        leave_id: i64,
        /// The status the transition was planned against.
        expected: LeaveStatus,
    },
    /// Password hashing failed.
    PasswordHashFailed(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::CorruptRow(msg) => write!(f, "Corrupt row: {msg}"),
            Self::EmployeeNotFound(id) => write!(f, "Employee {id} not found"),
            Self::LeaveNotFound(id) => write!(f, "Leave request {id} not found"),
            Self::RecordNotFound { kind, record_id } => {
                write!(f, "{} {record_id} not found", kind.display_name())
            }
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::DuplicateUsername(username) => {
                write!(f, "Username '{username}' is already in use")
            }
            Self::InsufficientBalance {
                employee_id,
                available,
                requested,
            } => write!(
                f,
                "Employee {employee_id} has {available} days available, {requested} days requested"
            ),
            Self::StaleLeaveStatus { leave_id, expected } => write!(
                f,
                "Leave request {leave_id} is no longer {expected}; it was modified concurrently"
            ),
            Self::PasswordHashFailed(msg) => write!(f, "Failed to hash password: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
