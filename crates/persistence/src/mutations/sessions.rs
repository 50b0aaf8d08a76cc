// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_audit::AuditEvent;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// Creates a new session and records the login `event`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `employee_id` - The employee ID
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
/// * `event` - The login audit event
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    employee_id: i64,
    expires_at: &str,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(sessions::table)
            .values((
                sessions::session_token.eq(session_token),
                sessions::employee_id.eq(employee_id),
                sessions::expires_at.eq(expires_at),
            ))
            .execute(conn)?;
        let session_id: i64 = get_last_insert_rowid(conn)?;

        persist_audit_event(conn, event)?;

        info!(session_id, employee_id, "Session created");
        Ok(session_id)
    })
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    debug!(session_id, "Updating session activity");

    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
            "CURRENT_TIMESTAMP",
        )))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token, recording `event` if one is given.
///
/// Expired sessions are removed without an audit entry; explicit logouts
/// pass their event.
///
/// # Errors
///
/// Returns `SessionNotFound` if no session has this token, or a database error.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    event: Option<&AuditEvent>,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let deleted: usize =
            diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
                .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::SessionNotFound(String::from(
                "no session for token",
            )));
        }

        if let Some(event) = event {
            persist_audit_event(conn, event)?;
        }

        debug!("Session deleted");
        Ok(())
    })
}

/// Deletes all expired sessions.
///
/// `now` is compared lexically against `expires_at`, so both must use the
/// same ISO 8601 format.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(sessions::table.filter(sessions::expires_at.lt(now)))
        .execute(conn)?;

    if deleted > 0 {
        info!(deleted, "Deleted expired sessions");
    }

    Ok(deleted)
}
