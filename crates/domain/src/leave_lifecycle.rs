// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request lifecycle.
//!
//! ## Transition table (authoritative)
//!
//! | From     | Action  | To       | Ledger effect       |
//! |----------|---------|----------|---------------------|
//! | pending  | approve | approved | debit `days`        |
//! | pending  | reject  | rejected | none                |
//! | approved | reject  | rejected | credit `days`       |
//! | rejected | reject  | rejected | none                |
//! | pending  | delete  | (gone)   | none                |
//! | approved | delete  | (gone)   | credit `days`       |
//! | rejected | delete  | (gone)   | none                |
//!
//! Approving anything that is not pending is an invalid transition. Approving
//! an approved request therefore never debits twice.

use crate::error::DomainError;
use crate::leave_ledger::LedgerEffect;
use crate::types::{LeaveRequest, LeaveStatus};
use serde::{Deserialize, Serialize};

/// A decision applied to an existing leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveAction {
    Approve,
    Reject,
    Delete,
}

impl LeaveAction {
    /// Converts this action to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for LeaveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a request ends up after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveOutcome {
    /// The request remains, with this status.
    Status(LeaveStatus),
    /// The request is removed.
    Deleted,
}

/// A validated, not yet committed lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTransition {
    /// The status observed when the transition was planned.
    pub from: LeaveStatus,
    /// The action being applied.
    pub action: LeaveAction,
    /// The resulting state of the request.
    pub outcome: LeaveOutcome,
    /// The balance movement to commit alongside the status change.
    pub ledger_effect: LedgerEffect,
}

/// Plans the transition `action` causes on `request`.
///
/// This does not inspect the balance. A planned debit may still fail when it
/// is applied to the owner's current balance.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` when approving a request that is
/// not pending.
pub fn plan_transition(
    request: &LeaveRequest,
    action: LeaveAction,
) -> Result<LeaveTransition, DomainError> {
    let from: LeaveStatus = request.status;
    let days: u32 = request.days();

    let (outcome, ledger_effect) = match (from, action) {
        (LeaveStatus::Pending, LeaveAction::Approve) => (
            LeaveOutcome::Status(LeaveStatus::Approved),
            LedgerEffect::Debit(days),
        ),
        (LeaveStatus::Approved | LeaveStatus::Rejected, LeaveAction::Approve) => {
            return Err(DomainError::InvalidTransition {
                leave_id: request.leave_id,
                from,
                action,
            });
        }
        (LeaveStatus::Pending | LeaveStatus::Rejected, LeaveAction::Reject) => {
            (LeaveOutcome::Status(LeaveStatus::Rejected), LedgerEffect::None)
        }
        (LeaveStatus::Approved, LeaveAction::Reject) => (
            LeaveOutcome::Status(LeaveStatus::Rejected),
            LedgerEffect::Credit(days),
        ),
        (LeaveStatus::Approved, LeaveAction::Delete) => {
            (LeaveOutcome::Deleted, LedgerEffect::Credit(days))
        }
        (LeaveStatus::Pending | LeaveStatus::Rejected, LeaveAction::Delete) => {
            (LeaveOutcome::Deleted, LedgerEffect::None)
        }
    };

    Ok(LeaveTransition {
        from,
        action,
        outcome,
        ledger_effect,
    })
}
