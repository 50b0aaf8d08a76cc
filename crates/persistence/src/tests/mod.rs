// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use crate::{Persistence, PersistenceError, PersistLeaveResult};
use shift_roster::{Command, LedgerState, TransitionResult, apply};
use shift_roster_audit::{Action, Actor, AuditEvent, Target};
use shift_roster_domain::{DateRange, Employee, LeaveBalance, LeaveRequest, Role, Shift};
use time::Date;
use time::macros::date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn system_actor() -> Actor {
    Actor::detached(String::from("System"))
}

pub fn event_for(action: &str, target: Target) -> AuditEvent {
    AuditEvent::new(system_actor(), Action::new(String::from(action), None), target)
}

/// Inserts an employee holding `balance` days and returns its ID.
pub fn seed_employee(
    persistence: &mut Persistence,
    username: &str,
    role: Role,
    shift: Option<Shift>,
    join_date: Date,
    balance: u32,
) -> i64 {
    let employee: Employee = Employee::new(
        username.to_uppercase(),
        username.to_string(),
        role,
        shift,
        join_date,
        balance,
    );
    persistence
        .create_employee(
            &employee,
            "secret",
            &event_for("CreateEmployee", Target::employee(&employee)),
        )
        .unwrap()
}

pub fn seed_operator(persistence: &mut Persistence, username: &str, balance: u32) -> i64 {
    seed_employee(
        persistence,
        username,
        Role::Operator,
        Some(Shift::A),
        date!(2021 - 01 - 01),
        balance,
    )
}

fn ledger_state(persistence: &mut Persistence, employee_id: i64) -> LedgerState {
    let employee: Employee = persistence
        .get_employee_by_id(employee_id)
        .unwrap()
        .unwrap()
        .employee;
    LedgerState::new(
        employee_id,
        employee.name,
        LeaveBalance::new(employee.annual_leave_balance),
    )
}

/// Submits a request for `start..=end` and returns its leave ID.
pub fn submit_leave(
    persistence: &mut Persistence,
    employee_id: i64,
    start: Date,
    end: Date,
) -> i64 {
    let state: LedgerState = ledger_state(persistence, employee_id);
    let result: TransitionResult = apply(
        &state,
        Command::SubmitLeave {
            range: DateRange::new(start, end).unwrap(),
        },
        system_actor(),
    )
    .unwrap();
    persistence.persist_leave_transition(&result).unwrap().leave_id
}

/// Plans a decision against the currently stored request and balance.
pub fn plan_decision(
    persistence: &mut Persistence,
    leave_id: i64,
    command: Command,
) -> TransitionResult {
    let leave: LeaveRequest = persistence.get_leave_by_id(leave_id).unwrap().unwrap();
    let base: LedgerState = ledger_state(persistence, leave.employee_id);
    let state: LedgerState =
        LedgerState::with_leave(base.employee_id, base.employee_name, base.balance, leave);
    apply(&state, command, system_actor()).unwrap()
}

/// Plans and commits a decision in one step.
pub fn decide(
    persistence: &mut Persistence,
    leave_id: i64,
    command: Command,
) -> Result<PersistLeaveResult, PersistenceError> {
    let result: TransitionResult = plan_decision(persistence, leave_id, command);
    persistence.persist_leave_transition(&result)
}

pub fn balance_of(persistence: &mut Persistence, employee_id: i64) -> u32 {
    persistence.get_leave_balance(employee_id).unwrap().unwrap()
}
