// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_audit::AuditEvent;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::activity_log;
use crate::error::PersistenceError;

/// Persists an audit event to the activity log.
///
/// Callers run this inside the transaction of the change it records.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(activity_log::table)
        .values((
            activity_log::actor_employee_id.eq(event.actor.employee_id),
            activity_log::actor_name.eq(&event.actor.name),
            activity_log::action.eq(&event.action.name),
            activity_log::target_type.eq(&event.target.target_type),
            activity_log::target_name.eq(event.target.target_name.as_deref()),
            activity_log::details.eq(event.action.details.as_deref()),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");

    Ok(event_id)
}
