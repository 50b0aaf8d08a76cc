// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_audit::{Action, Actor, AuditEvent, Target};

use crate::diesel_schema::activity_log;
use crate::error::PersistenceError;

/// Diesel Queryable struct for activity log rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = activity_log)]
struct ActivityRow {
    event_id: i64,
    actor_employee_id: Option<i64>,
    actor_name: String,
    action: String,
    target_type: String,
    target_name: Option<String>,
    details: Option<String>,
    created_at: String,
}

impl From<ActivityRow> for AuditEvent {
    fn from(row: ActivityRow) -> Self {
        let actor: Actor = match row.actor_employee_id {
            Some(employee_id) => Actor::new(employee_id, row.actor_name),
            None => Actor::detached(row.actor_name),
        };
        Self::with_id(
            row.event_id,
            actor,
            Action::new(row.action, row.details),
            Target::new(row.target_type, row.target_name),
            Some(row.created_at),
        )
    }
}

/// Lists the most recent activity log entries, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_activity(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<ActivityRow> = activity_log::table
        .order((activity_log::created_at.desc(), activity_log::event_id.desc()))
        .limit(limit)
        .select(ActivityRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(AuditEvent::from).collect())
}

/// Retrieves one activity log entry.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the entry is not found.
pub fn get_activity(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<AuditEvent>, PersistenceError> {
    let row: Option<ActivityRow> = activity_log::table
        .filter(activity_log::event_id.eq(event_id))
        .select(ActivityRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(AuditEvent::from))
}
