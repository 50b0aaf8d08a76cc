// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use shift_roster_persistence::Persistence;

use super::helpers::{
    balance_of, bootstrap_manager, create_test_persistence, hire, leave_request, submit,
    ten_day_config,
};
use crate::{
    ApiError, AuthenticatedActor, LeaveDecisionResponse, LeaveInfo, RosterConfig,
    SubmitLeaveRequest, SubmitLeaveResponse, approve_leave, delete_leave, list_leaves,
    reject_leave, submit_leave,
};

struct Roster {
    persistence: Persistence,
    manager: AuthenticatedActor,
    operator: AuthenticatedActor,
}

/// A manager plus one shift-A operator holding ten days.
fn roster() -> Roster {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = ten_day_config();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);
    let operator: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "omar",
        "operator",
        Some("A"),
        "2021-01-01",
    );
    Roster {
        persistence,
        manager,
        operator,
    }
}

fn is_rule(result: &Result<LeaveDecisionResponse, ApiError>, expected: &str) -> bool {
    matches!(result, Err(ApiError::DomainRuleViolation { rule, .. }) if rule == expected)
}

#[test]
fn test_submit_approve_reject_scenario() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();

    let submitted: SubmitLeaveResponse = submit_leave(
        &mut persistence,
        &operator,
        leave_request("2026-03-01", "2026-03-05"),
    )
    .unwrap();
    assert_eq!(submitted.days, 5);
    assert_eq!(submitted.status, "pending");
    assert_eq!(balance_of(&mut persistence, &operator), 10);

    let approved: LeaveDecisionResponse =
        approve_leave(&mut persistence, &manager, submitted.id).unwrap();
    assert_eq!(approved.status.as_deref(), Some("approved"));
    assert_eq!(approved.annual_leave_balance, 5);
    assert_eq!(balance_of(&mut persistence, &operator), 5);

    let rejected: LeaveDecisionResponse =
        reject_leave(&mut persistence, &manager, submitted.id).unwrap();
    assert_eq!(rejected.status.as_deref(), Some("rejected"));
    assert_eq!(rejected.annual_leave_balance, 10);
    assert_eq!(balance_of(&mut persistence, &operator), 10);

    let actions: Vec<String> = persistence
        .list_activity(3)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(actions, vec!["RejectLeave", "ApproveLeave", "SubmitLeave"]);
}

#[test]
fn test_double_approve_debits_once() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let leave_id: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-03");

    approve_leave(&mut persistence, &manager, leave_id).unwrap();
    let second = approve_leave(&mut persistence, &manager, leave_id);

    assert!(is_rule(&second, "leave_status_transition"));
    assert_eq!(balance_of(&mut persistence, &operator), 7);
}

#[test]
fn test_rejected_request_cannot_be_approved() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let leave_id: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-03");
    reject_leave(&mut persistence, &manager, leave_id).unwrap();

    let result = approve_leave(&mut persistence, &manager, leave_id);

    assert!(is_rule(&result, "leave_status_transition"));
    assert_eq!(balance_of(&mut persistence, &operator), 10);
}

#[test]
fn test_rejecting_pending_or_rejected_leaves_balance_alone() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let leave_id: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-03");

    reject_leave(&mut persistence, &manager, leave_id).unwrap();
    let again: LeaveDecisionResponse =
        reject_leave(&mut persistence, &manager, leave_id).unwrap();

    assert_eq!(again.status.as_deref(), Some("rejected"));
    assert_eq!(balance_of(&mut persistence, &operator), 10);
}

#[test]
fn test_submit_checks_balance_but_reserves_nothing() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();

    let too_long = submit_leave(
        &mut persistence,
        &operator,
        leave_request("2026-03-01", "2026-03-11"),
    );
    assert!(matches!(
        too_long,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "sufficient_balance"
    ));

    // Two pending requests may together exceed the balance.
    let first: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-06");
    let second: i64 = submit(&mut persistence, &operator, "2026-04-01", "2026-04-06");
    assert_eq!(balance_of(&mut persistence, &operator), 10);

    approve_leave(&mut persistence, &manager, first).unwrap();
    let result = approve_leave(&mut persistence, &manager, second);

    assert!(is_rule(&result, "sufficient_balance"));
    assert_eq!(balance_of(&mut persistence, &operator), 4);

    let still_pending: Vec<String> = list_leaves(&mut persistence, &operator)
        .unwrap()
        .into_iter()
        .filter(|l| l.id == second)
        .map(|l| l.status)
        .collect();
    assert_eq!(still_pending, vec!["pending"]);
}

#[test]
fn test_whole_balance_can_be_taken() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let leave_id: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-10");

    approve_leave(&mut persistence, &manager, leave_id).unwrap();

    assert_eq!(balance_of(&mut persistence, &operator), 0);
}

#[test]
fn test_invalid_dates_are_rejected() {
    let Roster {
        mut persistence,
        operator,
        ..
    } = roster();

    let reversed = submit_leave(
        &mut persistence,
        &operator,
        leave_request("2026-03-05", "2026-03-01"),
    );
    let missing = submit_leave(
        &mut persistence,
        &operator,
        SubmitLeaveRequest {
            start_date: Some(String::from("2026-03-01")),
            end_date: None,
        },
    );
    let malformed = submit_leave(
        &mut persistence,
        &operator,
        leave_request("2026-02-30", "2026-03-01"),
    );

    assert!(matches!(reversed, Err(ApiError::InvalidInput { .. })));
    assert!(matches!(
        missing,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "end_date"
    ));
    assert!(matches!(
        malformed,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "start_date"
    ));
    assert!(list_leaves(&mut persistence, &operator).unwrap().is_empty());
}

#[test]
fn test_single_day_leave_counts_one_day() {
    let Roster {
        mut persistence,
        operator,
        ..
    } = roster();

    let response: SubmitLeaveResponse = submit_leave(
        &mut persistence,
        &operator,
        leave_request("2026-03-01", "2026-03-01"),
    )
    .unwrap();

    assert_eq!(response.days, 1);
}

#[test]
fn test_managers_cannot_submit_and_others_cannot_decide() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let leave_id: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-02");

    assert!(matches!(
        submit_leave(
            &mut persistence,
            &manager,
            leave_request("2026-03-01", "2026-03-02")
        ),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        approve_leave(&mut persistence, &operator, leave_id),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        delete_leave(&mut persistence, &operator, leave_id),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_missing_request_is_not_found() {
    let Roster {
        mut persistence,
        manager,
        ..
    } = roster();

    for result in [
        approve_leave(&mut persistence, &manager, 999),
        reject_leave(&mut persistence, &manager, 999),
        delete_leave(&mut persistence, &manager, 999),
    ] {
        assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    }
}

#[test]
fn test_delete_refunds_only_approved_requests() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let approved: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-04");
    let pending: i64 = submit(&mut persistence, &operator, "2026-05-01", "2026-05-02");
    approve_leave(&mut persistence, &manager, approved).unwrap();
    assert_eq!(balance_of(&mut persistence, &operator), 6);

    let deleted_pending: LeaveDecisionResponse =
        delete_leave(&mut persistence, &manager, pending).unwrap();
    assert_eq!(deleted_pending.status, None);
    assert_eq!(deleted_pending.annual_leave_balance, 6);

    let deleted_approved: LeaveDecisionResponse =
        delete_leave(&mut persistence, &manager, approved).unwrap();
    assert_eq!(deleted_approved.annual_leave_balance, 10);

    assert!(persistence.get_leave_by_id(approved).unwrap().is_none());
    assert!(matches!(
        delete_leave(&mut persistence, &manager, approved),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_balance_equals_allotment_minus_approved_days() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let a: i64 = submit(&mut persistence, &operator, "2026-01-05", "2026-01-06");
    let b: i64 = submit(&mut persistence, &operator, "2026-02-01", "2026-02-03");
    let c: i64 = submit(&mut persistence, &operator, "2026-03-01", "2026-03-04");

    approve_leave(&mut persistence, &manager, a).unwrap();
    approve_leave(&mut persistence, &manager, b).unwrap();
    reject_leave(&mut persistence, &manager, a).unwrap();
    approve_leave(&mut persistence, &manager, c).unwrap();
    delete_leave(&mut persistence, &manager, b).unwrap();

    let approved_days: u32 = list_leaves(&mut persistence, &manager)
        .unwrap()
        .into_iter()
        .filter(|l| l.status == "approved")
        .map(|l| l.days)
        .sum();
    assert_eq!(approved_days, 4);
    assert_eq!(balance_of(&mut persistence, &operator), 10 - approved_days);
}

#[test]
fn test_leave_listing_is_scoped_by_role_and_shift() {
    let mut persistence: Persistence = create_test_persistence();
    let config: RosterConfig = RosterConfig::default();
    let manager: AuthenticatedActor = bootstrap_manager(&mut persistence);
    let supervisor_a: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "sara",
        "supervisor",
        Some("A"),
        "2015-01-01",
    );
    let other_supervisor_a: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "sami",
        "supervisor",
        Some("A"),
        "2016-01-01",
    );
    let operator_a: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "omar",
        "operator",
        Some("A"),
        "2021-01-01",
    );
    let operator_b: AuthenticatedActor = hire(
        &mut persistence,
        &config,
        &manager,
        "badr",
        "operator",
        Some("B"),
        "2021-01-01",
    );

    let own: i64 = submit(&mut persistence, &supervisor_a, "2026-03-01", "2026-03-02");
    let peer: i64 = submit(&mut persistence, &other_supervisor_a, "2026-03-03", "2026-03-04");
    let same_shift: i64 = submit(&mut persistence, &operator_a, "2026-03-05", "2026-03-06");
    let other_shift: i64 = submit(&mut persistence, &operator_b, "2026-03-07", "2026-03-08");

    let ids = |rows: Vec<LeaveInfo>| -> BTreeSet<i64> { rows.into_iter().map(|l| l.id).collect() };

    assert_eq!(
        ids(list_leaves(&mut persistence, &supervisor_a).unwrap()),
        BTreeSet::from([own, same_shift])
    );
    assert_eq!(
        ids(list_leaves(&mut persistence, &operator_a).unwrap()),
        BTreeSet::from([same_shift])
    );
    assert_eq!(
        ids(list_leaves(&mut persistence, &manager).unwrap()),
        BTreeSet::from([own, peer, same_shift, other_shift])
    );
}

#[test]
fn test_leave_listing_is_newest_first_and_annotated() {
    let Roster {
        mut persistence,
        manager,
        operator,
    } = roster();
    let older: i64 = submit(&mut persistence, &operator, "2026-06-01", "2026-06-02");
    let newer: i64 = submit(&mut persistence, &operator, "2026-01-01", "2026-01-03");

    let rows: Vec<LeaveInfo> = list_leaves(&mut persistence, &manager).unwrap();

    assert_eq!(rows.iter().map(|l| l.id).collect::<Vec<_>>(), vec![newer, older]);
    let first: &LeaveInfo = &rows[0];
    assert_eq!(first.employee_name, "OMAR");
    assert_eq!(first.role, "operator");
    assert_eq!(first.shift.as_deref(), Some("A"));
    assert_eq!(first.start_date, "2026-01-01");
    assert_eq!(first.end_date, "2026-01-03");
    assert_eq!(first.days, 3);
    assert_eq!(first.status, "pending");
}
