// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.
//!
//! Passwords arrive in plain text and are hashed with bcrypt before storage.
//! The leave balance is only ever set at creation; afterwards it moves
//! exclusively through the ledger in `mutations::leaves`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_audit::AuditEvent;
use shift_roster_domain::{Employee, Role, format_date};
use time::Date;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::EmployeeUpdate;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::employees::{is_username_taken, manager_exists};
use crate::queries::encode_days;

fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::PasswordHashFailed(e.to_string()))
}

fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
    password_hash: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(employees::table)
        .values((
            employees::name.eq(&employee.name),
            employees::username.eq(&employee.username),
            employees::password_hash.eq(password_hash),
            employees::role.eq(employee.role.as_str()),
            employees::shift.eq(employee.shift.map(|s| s.as_str())),
            employees::join_date.eq(format_date(employee.join_date)),
            employees::annual_leave_balance.eq(encode_days(employee.annual_leave_balance)?),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Creates a new employee and records `event`.
///
/// # Errors
///
/// Returns `DuplicateUsername` if the username is taken, or an error if
/// hashing or the database operation fails.
pub fn create_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
    password: &str,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    info!(
        username = %employee.username,
        role = %employee.role,
        "Creating employee"
    );

    let password_hash: String = hash_password(password)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        if is_username_taken(conn, &employee.username, None)? {
            return Err(PersistenceError::DuplicateUsername(employee.username.clone()));
        }

        let employee_id: i64 = insert_employee(conn, employee, &password_hash)?;
        persist_audit_event(conn, event)?;

        info!(employee_id, "Employee created successfully");
        Ok(employee_id)
    })
}

/// Updates an employee's profile and records `event`.
///
/// The leave balance is left untouched. The password is replaced only when
/// `update.password` is set.
///
/// # Errors
///
/// Returns `EmployeeNotFound`, `DuplicateUsername`, or a database error.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    update: &EmployeeUpdate,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    info!(employee_id, "Updating employee");

    let password_hash: Option<String> = update.password.as_deref().map(hash_password).transpose()?;
    let shift: Option<&str> = update.shift.map(|s| s.as_str());

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        if is_username_taken(conn, &update.username, Some(employee_id))? {
            return Err(PersistenceError::DuplicateUsername(update.username.clone()));
        }

        let updated: usize =
            diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
                .set((
                    employees::name.eq(&update.name),
                    employees::username.eq(&update.username),
                    employees::role.eq(update.role.as_str()),
                    employees::shift.eq(shift),
                    employees::join_date.eq(format_date(update.join_date)),
                ))
                .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }

        if let Some(hash) = &password_hash {
            diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
                .set(employees::password_hash.eq(hash))
                .execute(conn)?;
        }

        persist_audit_event(conn, event)?;
        Ok(())
    })
}

/// Deletes an employee and records `event`.
///
/// Leave requests, courses, mandates, and sessions of the employee are
/// removed by foreign key cascade.
///
/// # Errors
///
/// Returns `EmployeeNotFound` or a database error.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    info!(employee_id, "Deleting employee");

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let deleted: usize =
            diesel::delete(employees::table.filter(employees::employee_id.eq(employee_id)))
                .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }

        persist_audit_event(conn, event)?;
        Ok(())
    })
}

/// Replaces an employee's password and records `event`.
///
/// # Errors
///
/// Returns `EmployeeNotFound` or an error if hashing or the database
/// operation fails.
pub fn update_password(
    conn: &mut SqliteConnection,
    employee_id: i64,
    new_password: &str,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    info!(employee_id, "Changing password");

    let password_hash: String = hash_password(new_password)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize =
            diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
                .set(employees::password_hash.eq(&password_hash))
                .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }

        persist_audit_event(conn, event)?;
        Ok(())
    })
}

/// Creates the first manager account when no manager exists yet.
///
/// Returns the new employee ID, or `None` if a manager already exists.
///
/// # Errors
///
/// Returns an error if hashing or the database operation fails.
pub fn bootstrap_manager(
    conn: &mut SqliteConnection,
    name: &str,
    username: &str,
    password: &str,
    join_date: Date,
    allotment: u32,
) -> Result<Option<i64>, PersistenceError> {
    if manager_exists(conn)? {
        return Ok(None);
    }

    let manager: Employee = Employee::new(
        name.to_string(),
        username.to_string(),
        Role::Manager,
        None,
        join_date,
        allotment,
    );
    let password_hash: String = hash_password(password)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        if manager_exists(conn)? {
            return Ok(None);
        }
        if is_username_taken(conn, username, None)? {
            return Err(PersistenceError::DuplicateUsername(username.to_string()));
        }

        let employee_id: i64 = insert_employee(conn, &manager, &password_hash)?;
        info!(employee_id, username, "Bootstrapped default manager account");
        Ok(Some(employee_id))
    })
}
