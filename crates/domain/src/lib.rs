// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod leave_ledger;
mod leave_lifecycle;
mod nomination;
mod types;
mod validation;
mod visibility;

#[cfg(test)]
mod tests;

pub use leave_ledger::{
    LeaveBalance, LeaveLedgerSummary, LedgerEffect, check_submission, summarize_ledger,
};
pub use leave_lifecycle::{LeaveAction, LeaveOutcome, LeaveTransition, plan_transition};
pub use nomination::{NominationCandidate, NominationPosition, compare_priority, rank_nominees};
pub use visibility::{AssignmentView, LeaveView, RowKind, ScopedRow, is_visible, scope_rows};

// Re-export public types
pub use error::DomainError;
pub use types::{
    DateRange, Employee, LeaveRequest, LeaveStatus, NominableRecord, Principal, RecordKind, Role,
    RowOwner, Shift,
};
pub use validation::{
    format_date, parse_date, parse_leave_range, parse_required_date, validate_employee_fields,
    validate_record_fields, validate_role_shift, validate_username,
};
