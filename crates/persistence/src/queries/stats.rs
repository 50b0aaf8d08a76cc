// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard aggregation.

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use shift_roster_domain::{LeaveStatus, RecordKind, Role, Shift};
use std::str::FromStr;

use crate::data_models::{DashboardStats, ShiftCount};
use crate::diesel_schema::{employees, leave_requests, nominable_records};
use crate::error::PersistenceError;
use crate::queries::leaves::list_leave_views;

/// Number of recent leave requests included on the dashboard.
pub const RECENT_LEAVE_LIMIT: i64 = 5;

fn count_role(conn: &mut SqliteConnection, role: Role) -> Result<i64, PersistenceError> {
    Ok(employees::table
        .filter(employees::role.eq(role.as_str()))
        .select(count_star())
        .first(conn)?)
}

fn count_leaves(conn: &mut SqliteConnection, status: LeaveStatus) -> Result<i64, PersistenceError> {
    Ok(leave_requests::table
        .filter(leave_requests::status.eq(status.as_str()))
        .select(count_star())
        .first(conn)?)
}

fn count_records(conn: &mut SqliteConnection, kind: RecordKind) -> Result<i64, PersistenceError> {
    Ok(nominable_records::table
        .filter(nominable_records::kind.eq(kind.as_str()))
        .select(count_star())
        .first(conn)?)
}

/// Counts non-manager employees per shift, ordered by shift.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn count_by_shift(conn: &mut SqliteConnection) -> Result<Vec<ShiftCount>, PersistenceError> {
    let rows: Vec<(Option<String>, i64)> = employees::table
        .filter(employees::role.ne(Role::Manager.as_str()))
        .filter(employees::shift.is_not_null())
        .group_by(employees::shift)
        .select((employees::shift, count_star()))
        .order(employees::shift.asc())
        .load(conn)?;

    rows.into_iter()
        .filter_map(|(shift, count)| shift.map(|shift| (shift, count)))
        .map(|(shift, count)| {
            Shift::from_str(&shift)
                .map(|shift| ShiftCount { shift, count })
                .map_err(|e| PersistenceError::CorruptRow(e.to_string()))
        })
        .collect()
}

/// Gathers the manager dashboard figures.
///
/// # Errors
///
/// Returns an error if any underlying query fails.
pub fn dashboard_stats(conn: &mut SqliteConnection) -> Result<DashboardStats, PersistenceError> {
    let total_employees: i64 = employees::table.select(count_star()).first(conn)?;

    Ok(DashboardStats {
        total_employees,
        supervisors: count_role(conn, Role::Supervisor)?,
        operators: count_role(conn, Role::Operator)?,
        pending_leaves: count_leaves(conn, LeaveStatus::Pending)?,
        approved_leaves: count_leaves(conn, LeaveStatus::Approved)?,
        total_courses: count_records(conn, RecordKind::Course)?,
        total_mandates: count_records(conn, RecordKind::Mandate)?,
        by_shift: count_by_shift(conn)?,
        recent_leaves: list_leave_views(conn, Some(RECENT_LEAVE_LIMIT))?,
    })
}
