// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request queries.
//!
//! Listings return every row annotated with its owner; role scoping is
//! applied by the caller through the domain visibility rules.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_domain::{DateRange, LeaveRequest, LeaveView, RowOwner};
use tracing::debug;

use crate::diesel_schema::{employees, leave_requests};
use crate::error::PersistenceError;
use crate::queries::{decode_date, decode_role, decode_shift, decode_status};

/// Diesel Queryable struct for leave request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
struct LeaveRow {
    leave_id: i64,
    employee_id: i64,
    start_date: String,
    end_date: String,
    status: String,
    created_at: String,
}

impl LeaveRow {
    fn into_domain(self) -> Result<LeaveRequest, PersistenceError> {
        let range: DateRange = DateRange::new(
            decode_date("start_date", &self.start_date)?,
            decode_date("end_date", &self.end_date)?,
        )
        .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;

        Ok(LeaveRequest::with_id(
            self.leave_id,
            self.employee_id,
            range,
            decode_status(&self.status)?,
            Some(self.created_at),
        ))
    }
}

type OwnerColumns = (String, String, Option<String>);

fn into_view(row: LeaveRow, owner: OwnerColumns) -> Result<LeaveView, PersistenceError> {
    let (name, role, shift) = owner;
    let owner: RowOwner = RowOwner {
        employee_id: row.employee_id,
        name,
        role: decode_role(&role)?,
        shift: decode_shift(shift.as_deref())?,
    };
    Ok(LeaveView {
        leave: row.into_domain()?,
        owner,
    })
}

/// Retrieves a leave request by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request is not found.
pub fn get_leave_by_id(
    conn: &mut SqliteConnection,
    leave_id: i64,
) -> Result<Option<LeaveRequest>, PersistenceError> {
    debug!(leave_id, "Looking up leave request");

    leave_requests::table
        .filter(leave_requests::leave_id.eq(leave_id))
        .select(LeaveRow::as_select())
        .first(conn)
        .optional()?
        .map(LeaveRow::into_domain)
        .transpose()
}

/// Lists every leave request of one employee, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_leaves_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id))
        .order(leave_requests::leave_id.asc())
        .select(LeaveRow::as_select())
        .load(conn)?
        .into_iter()
        .map(LeaveRow::into_domain)
        .collect()
}

/// Lists leave requests joined with their owners, newest first.
///
/// `limit` caps the number of rows when present.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_leave_views(
    conn: &mut SqliteConnection,
    limit: Option<i64>,
) -> Result<Vec<LeaveView>, PersistenceError> {
    let mut query = leave_requests::table
        .inner_join(employees::table)
        .order((
            leave_requests::created_at.desc(),
            leave_requests::leave_id.desc(),
        ))
        .select((
            LeaveRow::as_select(),
            (employees::name, employees::role, employees::shift),
        ))
        .into_boxed();
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let rows: Vec<(LeaveRow, OwnerColumns)> = query.load(conn)?;
    rows.into_iter()
        .map(|(row, owner)| into_view(row, owner))
        .collect()
}
