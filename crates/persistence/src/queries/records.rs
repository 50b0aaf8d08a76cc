// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course and mandate queries.
//!
//! Both kinds share one table discriminated by `kind`; every query here is
//! filtered to a single kind so the two never mix.

use diesel::SqliteConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use shift_roster_domain::{
    AssignmentView, NominableRecord, NominationCandidate, RecordKind, Role, RowOwner,
};
use std::collections::HashMap;

use crate::diesel_schema::{employees, nominable_records};
use crate::error::PersistenceError;
use crate::queries::{decode_date, decode_kind, decode_role, decode_shift};

/// Diesel Queryable struct for course and mandate rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = nominable_records)]
struct RecordRow {
    record_id: i64,
    kind: String,
    title: String,
    location: String,
    record_date: String,
    employee_id: i64,
}

impl RecordRow {
    fn into_domain(self) -> Result<NominableRecord, PersistenceError> {
        Ok(NominableRecord::with_id(
            self.record_id,
            decode_kind(&self.kind)?,
            self.title,
            self.location,
            decode_date("date", &self.record_date)?,
            self.employee_id,
        ))
    }
}

/// Retrieves a course or mandate by ID.
///
/// A record of the other kind with the same ID is treated as absent.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the record is not found.
pub fn get_record(
    conn: &mut SqliteConnection,
    kind: RecordKind,
    record_id: i64,
) -> Result<Option<NominableRecord>, PersistenceError> {
    nominable_records::table
        .filter(nominable_records::record_id.eq(record_id))
        .filter(nominable_records::kind.eq(kind.as_str()))
        .select(RecordRow::as_select())
        .first(conn)
        .optional()?
        .map(RecordRow::into_domain)
        .transpose()
}

/// Lists records of one kind joined with their assignees, latest date first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_assignment_views(
    conn: &mut SqliteConnection,
    kind: RecordKind,
) -> Result<Vec<AssignmentView>, PersistenceError> {
    let rows: Vec<(RecordRow, (String, String, Option<String>))> = nominable_records::table
        .inner_join(employees::table)
        .filter(nominable_records::kind.eq(kind.as_str()))
        .order((
            nominable_records::record_date.desc(),
            nominable_records::record_id.desc(),
        ))
        .select((
            RecordRow::as_select(),
            (employees::name, employees::role, employees::shift),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, (name, role, shift))| {
            let owner: RowOwner = RowOwner {
                employee_id: row.employee_id,
                name,
                role: decode_role(&role)?,
                shift: decode_shift(shift.as_deref())?,
            };
            Ok(AssignmentView {
                record: row.into_domain()?,
                owner,
            })
        })
        .collect()
}

/// Loads every non-manager employee with the date of their latest record of `kind`.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_nomination_candidates(
    conn: &mut SqliteConnection,
    kind: RecordKind,
) -> Result<Vec<NominationCandidate>, PersistenceError> {
    // ISO dates order lexically, so MAX over the text column is the latest date.
    let latest: HashMap<i64, Option<String>> = nominable_records::table
        .filter(nominable_records::kind.eq(kind.as_str()))
        .group_by(nominable_records::employee_id)
        .select((
            nominable_records::employee_id,
            max(nominable_records::record_date),
        ))
        .load::<(i64, Option<String>)>(conn)?
        .into_iter()
        .collect();

    let rows: Vec<(i64, String, String, Option<String>, String)> = employees::table
        .filter(employees::role.ne(Role::Manager.as_str()))
        .select((
            employees::employee_id,
            employees::name,
            employees::role,
            employees::shift,
            employees::join_date,
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(employee_id, name, role, shift, join_date)| {
            let last_record_date = latest
                .get(&employee_id)
                .and_then(Option::as_deref)
                .map(|date| decode_date("date", date))
                .transpose()?;
            Ok(NominationCandidate {
                employee_id,
                name,
                role: decode_role(&role)?,
                shift: decode_shift(shift.as_deref())?,
                join_date: decode_date("join_date", &join_date)?,
                last_record_date,
            })
        })
        .collect()
}
