// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shift_roster_domain::RecordKind;
use shift_roster_persistence::{EmployeeData, Persistence};
use time::macros::date;

use crate::{
    AuthenticatedActor, CreateEmployeeRequest, EmployeeResponse, RecordRequest, RosterConfig,
    SubmitLeaveRequest, create_employee, create_record, submit_leave,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Configuration with a small allotment so balances are easy to follow.
pub fn ten_day_config() -> RosterConfig {
    RosterConfig::new(10, 8)
}

pub fn actor_for(persistence: &mut Persistence, employee_id: i64) -> AuthenticatedActor {
    let data: EmployeeData = persistence
        .get_employee_by_id(employee_id)
        .unwrap()
        .expect("employee exists");
    AuthenticatedActor::from_employee(&data.employee).expect("persisted employee")
}

pub fn bootstrap_manager(persistence: &mut Persistence) -> AuthenticatedActor {
    let employee_id: i64 = persistence
        .bootstrap_manager("Administrator", "admin", "admin123", date!(2020 - 01 - 01), 36)
        .unwrap()
        .expect("fresh database has no manager");
    actor_for(persistence, employee_id)
}

/// Hires an employee through the handler. The password is always "secret"
/// and the display name is the username in upper case.
pub fn hire(
    persistence: &mut Persistence,
    config: &RosterConfig,
    manager: &AuthenticatedActor,
    username: &str,
    role: &str,
    shift: Option<&str>,
    join_date: &str,
) -> AuthenticatedActor {
    let response: EmployeeResponse = create_employee(
        persistence,
        config,
        manager,
        CreateEmployeeRequest {
            name: Some(username.to_uppercase()),
            username: Some(username.to_string()),
            password: Some(String::from("secret")),
            role: Some(role.to_string()),
            shift: shift.map(String::from),
            join_date: Some(join_date.to_string()),
        },
    )
    .unwrap();
    actor_for(persistence, response.employee.id)
}

pub fn leave_request(start_date: &str, end_date: &str) -> SubmitLeaveRequest {
    SubmitLeaveRequest {
        start_date: Some(start_date.to_string()),
        end_date: Some(end_date.to_string()),
    }
}

pub fn submit(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    start_date: &str,
    end_date: &str,
) -> i64 {
    submit_leave(persistence, actor, leave_request(start_date, end_date))
        .unwrap()
        .id
}

pub fn record_request(title: &str, date: &str, employee_id: i64) -> RecordRequest {
    RecordRequest {
        title: Some(title.to_string()),
        location: Some(String::from("Training centre")),
        date: Some(date.to_string()),
        employee_id: Some(employee_id),
    }
}

pub fn assign(
    persistence: &mut Persistence,
    manager: &AuthenticatedActor,
    kind: RecordKind,
    title: &str,
    date: &str,
    employee_id: i64,
) -> i64 {
    create_record(
        persistence,
        manager,
        kind,
        record_request(title, date, employee_id),
    )
    .unwrap()
    .id
}

pub fn balance_of(persistence: &mut Persistence, actor: &AuthenticatedActor) -> u32 {
    persistence
        .get_leave_balance(actor.employee_id())
        .unwrap()
        .expect("employee exists")
}
