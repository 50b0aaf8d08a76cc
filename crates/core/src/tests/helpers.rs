// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::LedgerState;
use shift_roster_audit::Actor;
use shift_roster_domain::{DateRange, LeaveBalance, LeaveRequest, LeaveStatus};
use time::macros::date;

pub const EMPLOYEE_ID: i64 = 7;

pub fn create_test_actor() -> Actor {
    Actor::new(1, String::from("Admin"))
}

/// 2026-03-01 through 2026-03-05.
pub fn five_day_range() -> DateRange {
    DateRange::new(date!(2026 - 03 - 01), date!(2026 - 03 - 05)).unwrap()
}

pub fn create_test_state(balance: u32) -> LedgerState {
    LedgerState::new(EMPLOYEE_ID, String::from("Omar"), LeaveBalance::new(balance))
}

pub fn create_test_state_with_leave(balance: u32, leave_id: i64, status: LeaveStatus) -> LedgerState {
    LedgerState::with_leave(
        EMPLOYEE_ID,
        String::from("Omar"),
        LeaveBalance::new(balance),
        LeaveRequest::with_id(leave_id, EMPLOYEE_ID, five_day_range(), status, None),
    )
}
