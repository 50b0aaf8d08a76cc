// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::SessionData;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    employee_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        employee_id: row.employee_id,
        created_at: row.created_at,
        last_activity_at: row.last_activity_at,
        expires_at: row.expires_at,
    }))
}
