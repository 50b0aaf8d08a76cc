// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_domain::{Employee, Role};
use tracing::debug;

use crate::data_models::EmployeeData;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;
use crate::queries::{decode_balance, decode_date, decode_role, decode_shift};

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    name: String,
    username: String,
    password_hash: String,
    role: String,
    shift: Option<String>,
    join_date: String,
    annual_leave_balance: i32,
    created_at: String,
}

impl EmployeeRow {
    fn into_data(self) -> Result<EmployeeData, PersistenceError> {
        let employee: Employee = Employee::with_id(
            self.employee_id,
            self.name,
            self.username,
            decode_role(&self.role)?,
            decode_shift(self.shift.as_deref())?,
            decode_date("join_date", &self.join_date)?,
            decode_balance(self.annual_leave_balance)?,
        );
        Ok(EmployeeData {
            employee,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee_by_id(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<EmployeeData>, PersistenceError> {
    debug!(employee_id, "Looking up employee by ID");

    employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(EmployeeRow::into_data)
        .transpose()
}

/// Retrieves an employee by username.
///
/// Usernames are compared case-sensitively.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<EmployeeData>, PersistenceError> {
    debug!(username, "Looking up employee by username");

    employees::table
        .filter(employees::username.eq(username))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(EmployeeRow::into_data)
        .transpose()
}

/// Lists every employee: managers, then supervisors, then operators, each
/// group ordered by shift and then name.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .select(EmployeeRow::as_select())
        .load(conn)?;

    let mut result: Vec<Employee> = rows
        .into_iter()
        .map(|row| row.into_data().map(|data| data.employee))
        .collect::<Result<_, _>>()?;

    result.sort_by(|a, b| {
        a.role
            .listing_rank()
            .cmp(&b.role.listing_rank())
            .then_with(|| a.shift.cmp(&b.shift))
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(result)
}

/// Checks whether `username` belongs to an employee other than `excluding`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_username_taken(
    conn: &mut SqliteConnection,
    username: &str,
    excluding: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = employees::table
        .filter(employees::username.eq(username))
        .into_boxed();
    if let Some(employee_id) = excluding {
        query = query.filter(employees::employee_id.ne(employee_id));
    }

    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Checks whether at least one manager account exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn manager_exists(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::role.eq(Role::Manager.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Reads an employee's current leave balance.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_leave_balance(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<u32>, PersistenceError> {
    employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(employees::annual_leave_balance)
        .first::<i32>(conn)
        .optional()?
        .map(decode_balance)
        .transpose()
}

/// Verifies a plain-text password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::PasswordHashFailed(e.to_string()))
}
