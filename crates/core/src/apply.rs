// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{LeaveChange, LedgerState, TransitionResult};
use shift_roster_audit::{Action, Actor, AuditEvent, Target};
use shift_roster_domain::{
    DomainError, LeaveAction, LeaveBalance, LeaveOutcome, LeaveRequest, LeaveTransition,
    LedgerEffect, check_submission, format_date, plan_transition,
};

/// Applies a command to a ledger state, producing the new state and audit event.
///
/// This function is pure: it performs no I/O. The caller commits the returned
/// change, ledger effect, and audit event atomically.
///
/// # Arguments
///
/// * `state` - The current ledger state (immutable)
/// * `command` - The command to apply
/// * `actor` - The employee performing this action
///
/// # Errors
///
/// Returns an error if:
/// - A submission exceeds the current balance
/// - The targeted request is not part of this state
/// - The lifecycle forbids the action from the request's current status
/// - An approval exceeds the current balance
pub fn apply(
    state: &LedgerState,
    command: Command,
    actor: Actor,
) -> Result<TransitionResult, CoreError> {
    let audit_name: &'static str = command.audit_name();

    match command {
        Command::SubmitLeave { range } => {
            check_submission(state.balance, &range)?;

            let request: LeaveRequest = LeaveRequest::new(state.employee_id, range);
            let details: String = describe_request(&request);

            let new_state: LedgerState = LedgerState {
                leave: Some(request.clone()),
                ..state.clone()
            };

            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                Action::new(String::from(audit_name), Some(details)),
                Target::leave(&state.employee_name),
            );

            Ok(TransitionResult {
                new_state,
                change: LeaveChange::Created(request),
                ledger_effect: LedgerEffect::None,
                audit_event,
            })
        }
        Command::ApproveLeave { leave_id } => {
            apply_decision(state, leave_id, LeaveAction::Approve, audit_name, actor)
        }
        Command::RejectLeave { leave_id } => {
            apply_decision(state, leave_id, LeaveAction::Reject, audit_name, actor)
        }
        Command::DeleteLeave { leave_id } => {
            apply_decision(state, leave_id, LeaveAction::Delete, audit_name, actor)
        }
    }
}

fn apply_decision(
    state: &LedgerState,
    leave_id: i64,
    action: LeaveAction,
    audit_name: &'static str,
    actor: Actor,
) -> Result<TransitionResult, CoreError> {
    let request: &LeaveRequest = state
        .leave
        .as_ref()
        .filter(|r| r.leave_id == Some(leave_id) && r.employee_id == state.employee_id)
        .ok_or(DomainError::LeaveNotFound(leave_id))?;

    let transition: LeaveTransition = plan_transition(request, action)?;
    let balance: LeaveBalance = transition.ledger_effect.apply_to(state.balance)?;

    let (leave, change) = match transition.outcome {
        LeaveOutcome::Status(to) => {
            let mut updated: LeaveRequest = request.clone();
            updated.status = to;
            (
                Some(updated),
                LeaveChange::StatusChanged {
                    leave_id,
                    from: transition.from,
                    to,
                },
            )
        }
        LeaveOutcome::Deleted => (
            None,
            LeaveChange::Deleted {
                leave_id,
                from: transition.from,
            },
        ),
    };

    let details: String = match transition.ledger_effect {
        LedgerEffect::None => describe_request(request),
        LedgerEffect::Debit(days) => format!("{}; debited {days}", describe_request(request)),
        LedgerEffect::Credit(days) => format!("{}; refunded {days}", describe_request(request)),
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        Action::new(String::from(audit_name), Some(details)),
        Target::leave(&state.employee_name),
    );

    Ok(TransitionResult {
        new_state: LedgerState {
            employee_id: state.employee_id,
            employee_name: state.employee_name.clone(),
            balance,
            leave,
        },
        change,
        ledger_effect: transition.ledger_effect,
        audit_event,
    })
}

fn describe_request(request: &LeaveRequest) -> String {
    format!(
        "{} to {} ({} days)",
        format_date(request.range.start()),
        format_date(request.range.end()),
        request.days()
    )
}
