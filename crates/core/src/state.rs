// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster_audit::AuditEvent;
use shift_roster_domain::{LeaveBalance, LeaveRequest, LeaveStatus, LedgerEffect};

/// The slice of system state a leave command operates on.
///
/// State is scoped to one employee's balance and, for commands acting on an
/// existing request, that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    /// The employee whose ledger this is.
    pub employee_id: i64,
    /// The employee's display name, used for audit targets.
    pub employee_name: String,
    /// The employee's current balance.
    pub balance: LeaveBalance,
    /// The request being acted upon. `None` when submitting, or after deletion.
    pub leave: Option<LeaveRequest>,
}

impl LedgerState {
    /// Creates ledger state for a submission.
    #[must_use]
    pub const fn new(employee_id: i64, employee_name: String, balance: LeaveBalance) -> Self {
        Self {
            employee_id,
            employee_name,
            balance,
            leave: None,
        }
    }

    /// Creates ledger state for a command acting on `leave`.
    #[must_use]
    pub const fn with_leave(
        employee_id: i64,
        employee_name: String,
        balance: LeaveBalance,
        leave: LeaveRequest,
    ) -> Self {
        Self {
            employee_id,
            employee_name,
            balance,
            leave: Some(leave),
        }
    }
}

/// The change a transition makes to the stored request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveChange {
    /// A new pending request is inserted.
    Created(LeaveRequest),
    /// An existing request moves from `from` to `to`.
    ///
    /// `from == to` when rejecting an already rejected request; the row is
    /// still required to exist in `from`.
    StatusChanged {
        /// The request.
        leave_id: i64,
        /// The status the transition was planned against.
        from: LeaveStatus,
        /// The resulting status.
        to: LeaveStatus,
    },
    /// An existing request is removed.
    Deleted {
        /// The request.
        leave_id: i64,
        /// The status the transition was planned against.
        from: LeaveStatus,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: the persistence layer commits the request change,
/// the ledger effect, and the audit event together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: LedgerState,
    /// The change to the stored request.
    pub change: LeaveChange,
    /// The balance movement to commit.
    pub ledger_effect: LedgerEffect,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
