// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Shift Roster system.
//!
//! This crate stores employees, leave requests, courses, mandates, sessions,
//! and the activity log in `SQLite` through Diesel.
//!
//! ## Atomicity
//!
//! Every state change is written together with its audit event inside one
//! `BEGIN IMMEDIATE` transaction. Leave approvals debit the balance with a
//! conditional update that only matches while enough days remain, so the
//! balance can never go negative even under concurrent approvals.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives each caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use shift_roster::TransitionResult;
use shift_roster_audit::AuditEvent;
use shift_roster_domain::{
    AssignmentView, Employee, LeaveRequest, LeaveView, NominableRecord, NominationCandidate,
    RecordKind,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    DashboardStats, EmployeeData, EmployeeUpdate, PersistLeaveResult, SessionData, ShiftCount,
};
pub use error::PersistenceError;
pub use queries::stats::RECENT_LEAVE_LIMIT;

/// Persistence adapter for the roster database.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Creates an employee. See `mutations::employees::create_employee`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` or a database error.
    pub fn create_employee(
        &mut self,
        employee: &Employee,
        password: &str,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::employees::create_employee(&mut self.conn, employee, password, event)
    }

    /// Updates an employee's profile, never the leave balance.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound`, `DuplicateUsername`, or a database error.
    pub fn update_employee(
        &mut self,
        employee_id: i64,
        update: &EmployeeUpdate,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_employee(&mut self.conn, employee_id, update, event)
    }

    /// Deletes an employee together with everything they own.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or a database error.
    pub fn delete_employee(
        &mut self,
        employee_id: i64,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::employees::delete_employee(&mut self.conn, employee_id, event)
    }

    /// Replaces an employee's password.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or a database error.
    pub fn update_password(
        &mut self,
        employee_id: i64,
        new_password: &str,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::employees::update_password(&mut self.conn, employee_id, new_password, event)
    }

    /// Creates the first manager if none exists.
    ///
    /// Returns the new employee ID, or `None` when a manager already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn bootstrap_manager(
        &mut self,
        name: &str,
        username: &str,
        password: &str,
        join_date: Date,
        allotment: u32,
    ) -> Result<Option<i64>, PersistenceError> {
        mutations::employees::bootstrap_manager(
            &mut self.conn,
            name,
            username,
            password,
            join_date,
            allotment,
        )
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_employee_by_id(
        &mut self,
        employee_id: i64,
    ) -> Result<Option<EmployeeData>, PersistenceError> {
        queries::employees::get_employee_by_id(&mut self.conn, employee_id)
    }

    /// Retrieves an employee by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_employee_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<EmployeeData>, PersistenceError> {
        queries::employees::get_employee_by_username(&mut self.conn, username)
    }

    /// Lists all employees in roster order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn)
    }

    /// Reads an employee's current leave balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_leave_balance(&mut self, employee_id: i64) -> Result<Option<u32>, PersistenceError> {
        queries::employees::get_leave_balance(&mut self.conn, employee_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        queries::employees::verify_password(password, password_hash)
    }

    // ========================================================================
    // Leave
    // ========================================================================

    /// Commits a leave transition atomically.
    ///
    /// # Errors
    ///
    /// Returns `LeaveNotFound`, `StaleLeaveStatus`, `InsufficientBalance`,
    /// or a database error. Nothing is written on error.
    pub fn persist_leave_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistLeaveResult, PersistenceError> {
        mutations::leaves::persist_leave_transition(&mut self.conn, result)
    }

    /// Retrieves a leave request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_leave_by_id(
        &mut self,
        leave_id: i64,
    ) -> Result<Option<LeaveRequest>, PersistenceError> {
        queries::leaves::get_leave_by_id(&mut self.conn, leave_id)
    }

    /// Lists one employee's leave requests, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leaves_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::leaves::list_leaves_for_employee(&mut self.conn, employee_id)
    }

    /// Lists every leave request with its owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leave_views(&mut self) -> Result<Vec<LeaveView>, PersistenceError> {
        queries::leaves::list_leave_views(&mut self.conn, None)
    }

    // ========================================================================
    // Courses and mandates
    // ========================================================================

    /// Creates a course or mandate.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` or a database error.
    pub fn create_record(
        &mut self,
        record: &NominableRecord,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::records::create_record(&mut self.conn, record, event)
    }

    /// Replaces a course or mandate.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound`, `EmployeeNotFound`, or a database error.
    pub fn update_record(
        &mut self,
        record_id: i64,
        record: &NominableRecord,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::records::update_record(&mut self.conn, record_id, record, event)
    }

    /// Deletes a course or mandate.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` or a database error.
    pub fn delete_record(
        &mut self,
        kind: RecordKind,
        record_id: i64,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::records::delete_record(&mut self.conn, kind, record_id, event)
    }

    /// Retrieves a course or mandate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_record(
        &mut self,
        kind: RecordKind,
        record_id: i64,
    ) -> Result<Option<NominableRecord>, PersistenceError> {
        queries::records::get_record(&mut self.conn, kind, record_id)
    }

    /// Lists records of one kind with their assignees, latest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_assignment_views(
        &mut self,
        kind: RecordKind,
    ) -> Result<Vec<AssignmentView>, PersistenceError> {
        queries::records::list_assignment_views(&mut self.conn, kind)
    }

    /// Loads the nomination pool for one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_nomination_candidates(
        &mut self,
        kind: RecordKind,
    ) -> Result<Vec<NominationCandidate>, PersistenceError> {
        queries::records::list_nomination_candidates(&mut self.conn, kind)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session and records the login.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        employee_id: i64,
        expires_at: &str,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(
            &mut self.conn,
            session_token,
            employee_id,
            expires_at,
            event,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session, recording `event` when given.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` or a database error.
    pub fn delete_session(
        &mut self,
        session_token: &str,
        event: Option<&AuditEvent>,
    ) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token, event)
    }

    /// Deletes every session that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Activity log and statistics
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Lists the newest `limit` activity log entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_activity(&mut self, limit: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_activity(&mut self.conn, limit)
    }

    /// Retrieves one activity log entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_activity(&mut self, event_id: i64) -> Result<Option<AuditEvent>, PersistenceError> {
        queries::audit::get_activity(&mut self.conn, event_id)
    }

    /// Gathers the dashboard figures.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn dashboard_stats(&mut self) -> Result<DashboardStats, PersistenceError> {
        queries::stats::dashboard_stats(&mut self.conn)
    }
}
