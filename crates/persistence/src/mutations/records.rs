// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course and mandate mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster_audit::AuditEvent;
use shift_roster_domain::{NominableRecord, RecordKind, format_date};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::nominable_records;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::employees::get_leave_balance;

fn ensure_employee_exists(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    get_leave_balance(conn, employee_id)?
        .map(|_| ())
        .ok_or(PersistenceError::EmployeeNotFound(employee_id))
}

/// Creates a course or mandate and records `event`.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the assignee does not exist, or a database error.
pub fn create_record(
    conn: &mut SqliteConnection,
    record: &NominableRecord,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        ensure_employee_exists(conn, record.employee_id)?;

        diesel::insert_into(nominable_records::table)
            .values((
                nominable_records::kind.eq(record.kind.as_str()),
                nominable_records::title.eq(&record.title),
                nominable_records::location.eq(&record.location),
                nominable_records::record_date.eq(format_date(record.date)),
                nominable_records::employee_id.eq(record.employee_id),
            ))
            .execute(conn)?;
        let record_id: i64 = get_last_insert_rowid(conn)?;

        persist_audit_event(conn, event)?;

        info!(record_id, kind = %record.kind, employee_id = record.employee_id, "Created record");
        Ok(record_id)
    })
}

/// Replaces every field of an existing course or mandate and records `event`.
///
/// # Errors
///
/// Returns `RecordNotFound`, `EmployeeNotFound`, or a database error.
pub fn update_record(
    conn: &mut SqliteConnection,
    record_id: i64,
    record: &NominableRecord,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    let kind: RecordKind = record.kind;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        ensure_employee_exists(conn, record.employee_id)?;

        let updated: usize = diesel::update(
            nominable_records::table
                .filter(nominable_records::record_id.eq(record_id))
                .filter(nominable_records::kind.eq(kind.as_str())),
        )
        .set((
            nominable_records::title.eq(&record.title),
            nominable_records::location.eq(&record.location),
            nominable_records::record_date.eq(format_date(record.date)),
            nominable_records::employee_id.eq(record.employee_id),
        ))
        .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::RecordNotFound { kind, record_id });
        }

        persist_audit_event(conn, event)?;

        info!(record_id, kind = %kind, "Updated record");
        Ok(())
    })
}

/// Deletes a course or mandate and records `event`.
///
/// # Errors
///
/// Returns `RecordNotFound` or a database error.
pub fn delete_record(
    conn: &mut SqliteConnection,
    kind: RecordKind,
    record_id: i64,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let deleted: usize = diesel::delete(
            nominable_records::table
                .filter(nominable_records::record_id.eq(record_id))
                .filter(nominable_records::kind.eq(kind.as_str())),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::RecordNotFound { kind, record_id });
        }

        persist_audit_event(conn, event)?;

        info!(record_id, kind = %kind, "Deleted record");
        Ok(())
    })
}
