// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave transitions and the balance ledger.
//!
//! A transition is committed as one immediate transaction: the request row
//! change, the balance movement, and the audit event. The request row is
//! guarded on the status the transition was planned against, and a debit is
//! a single conditional `UPDATE ... WHERE annual_leave_balance >= n`, so two
//! concurrent approvals can never both spend the same days.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shift_roster::{LeaveChange, TransitionResult};
use shift_roster_domain::{LeaveRequest, LeaveStatus, LedgerEffect, format_date};
use tracing::{info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::PersistLeaveResult;
use crate::diesel_schema::{employees, leave_requests};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::employees::get_leave_balance;
use crate::queries::encode_days;
use crate::queries::leaves::get_leave_by_id;

/// Commits a leave transition produced by the core state machine.
///
/// # Errors
///
/// Returns an error if:
/// - The request no longer exists (`LeaveNotFound`)
/// - The request's status changed since the transition was planned (`StaleLeaveStatus`)
/// - A debit finds fewer days than requested (`InsufficientBalance`)
/// - The database operation fails
///
/// On any error nothing is written.
pub fn persist_leave_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistLeaveResult, PersistenceError> {
    let employee_id: i64 = result.new_state.employee_id;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let leave_id: i64 = match &result.change {
            LeaveChange::Created(request) => insert_leave(conn, request)?,
            LeaveChange::StatusChanged { leave_id, from, to } => {
                let updated: usize = diesel::update(
                    leave_requests::table
                        .filter(leave_requests::leave_id.eq(*leave_id))
                        .filter(leave_requests::status.eq(from.as_str())),
                )
                .set(leave_requests::status.eq(to.as_str()))
                .execute(conn)?;
                if updated == 0 {
                    return Err(stale_or_missing(conn, *leave_id, *from)?);
                }
                *leave_id
            }
            LeaveChange::Deleted { leave_id, from } => {
                let deleted: usize = diesel::delete(
                    leave_requests::table
                        .filter(leave_requests::leave_id.eq(*leave_id))
                        .filter(leave_requests::status.eq(from.as_str())),
                )
                .execute(conn)?;
                if deleted == 0 {
                    return Err(stale_or_missing(conn, *leave_id, *from)?);
                }
                *leave_id
            }
        };

        match result.ledger_effect {
            LedgerEffect::None => {}
            LedgerEffect::Debit(days) => debit_balance(conn, employee_id, days)?,
            LedgerEffect::Credit(days) => credit_balance(conn, employee_id, days)?,
        }

        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;

        info!(
            leave_id,
            employee_id,
            event_id,
            action = %result.audit_event.action.name,
            delta = result.ledger_effect.delta(),
            "Committed leave transition"
        );

        Ok(PersistLeaveResult { leave_id, event_id })
    })
}

fn insert_leave(
    conn: &mut SqliteConnection,
    request: &LeaveRequest,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(leave_requests::table)
        .values((
            leave_requests::employee_id.eq(request.employee_id),
            leave_requests::start_date.eq(format_date(request.range.start())),
            leave_requests::end_date.eq(format_date(request.range.end())),
            leave_requests::status.eq(request.status.as_str()),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Explains why a status-guarded write matched no row.
fn stale_or_missing(
    conn: &mut SqliteConnection,
    leave_id: i64,
    expected: LeaveStatus,
) -> Result<PersistenceError, PersistenceError> {
    if get_leave_by_id(conn, leave_id)?.is_none() {
        return Ok(PersistenceError::LeaveNotFound(leave_id));
    }
    warn!(leave_id, expected = %expected, "Leave request status changed concurrently");
    Ok(PersistenceError::StaleLeaveStatus { leave_id, expected })
}

/// Debits `days` from the employee's balance if, and only if, they are available.
///
/// # Errors
///
/// Returns `InsufficientBalance` if the balance is below `days`,
/// `EmployeeNotFound` if the employee does not exist, or a database error.
pub fn debit_balance(
    conn: &mut SqliteConnection,
    employee_id: i64,
    days: u32,
) -> Result<(), PersistenceError> {
    let amount: i32 = encode_days(days)?;

    let updated: usize = diesel::update(
        employees::table
            .filter(employees::employee_id.eq(employee_id))
            .filter(employees::annual_leave_balance.ge(amount)),
    )
    .set(employees::annual_leave_balance.eq(employees::annual_leave_balance - amount))
    .execute(conn)?;

    if updated == 0 {
        let available: u32 = get_leave_balance(conn, employee_id)?
            .ok_or(PersistenceError::EmployeeNotFound(employee_id))?;
        return Err(PersistenceError::InsufficientBalance {
            employee_id,
            available,
            requested: days,
        });
    }

    Ok(())
}

/// Credits `days` back to the employee's balance.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the employee does not exist, or a database error.
pub fn credit_balance(
    conn: &mut SqliteConnection,
    employee_id: i64,
    days: u32,
) -> Result<(), PersistenceError> {
    let amount: i32 = encode_days(days)?;

    let updated: usize = diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
        .set(employees::annual_leave_balance.eq(employees::annual_leave_balance + amount))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }

    Ok(())
}
