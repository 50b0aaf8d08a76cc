// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Annual leave balance ledger.
//!
//! The ledger owns one invariant: an employee's stored balance equals their
//! granted allotment minus the days of every request currently approved.
//! The balance only moves through [`LedgerEffect`]s produced by leave
//! lifecycle transitions. A debit is always checked against the current
//! balance first, so the balance can never go negative. A credit has no
//! ceiling: refunds may push a balance above the nominal allotment.

use crate::error::DomainError;
use crate::types::{DateRange, LeaveRequest, LeaveStatus};
use serde::{Deserialize, Serialize};

/// An employee's remaining annual leave, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeaveBalance {
    days: u32,
}

impl LeaveBalance {
    /// Creates a balance holding `days`.
    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    /// Returns the number of days available.
    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Whether `days` can be debited without going negative.
    #[must_use]
    pub const fn covers(&self, days: u32) -> bool {
        self.days >= days
    }

    /// Removes `days` from the balance.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientBalance` if fewer than `days` remain.
    /// The balance is left untouched in that case.
    pub const fn debit(self, days: u32) -> Result<Self, DomainError> {
        match self.days.checked_sub(days) {
            Some(remaining) => Ok(Self { days: remaining }),
            None => Err(DomainError::InsufficientBalance {
                available: self.days,
                requested: days,
            }),
        }
    }

    /// Returns `days` to the balance.
    #[must_use]
    pub const fn credit(self, days: u32) -> Self {
        Self {
            days: self.days.saturating_add(days),
        }
    }
}

impl std::fmt::Display for LeaveBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.days)
    }
}

/// The balance movement a lifecycle transition commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerEffect {
    /// The balance is untouched.
    None,
    /// Days are removed from the balance.
    Debit(u32),
    /// Days are refunded to the balance.
    Credit(u32),
}

impl LedgerEffect {
    /// Applies this effect to a balance.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientBalance` if a debit exceeds the balance.
    pub const fn apply_to(self, balance: LeaveBalance) -> Result<LeaveBalance, DomainError> {
        match self {
            Self::None => Ok(balance),
            Self::Debit(days) => balance.debit(days),
            Self::Credit(days) => Ok(balance.credit(days)),
        }
    }

    /// The signed change in balance this effect causes.
    #[must_use]
    pub fn delta(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Debit(days) => -i64::from(*days),
            Self::Credit(days) => i64::from(*days),
        }
    }
}

/// Checks a new request against the employee's balance at submission time.
///
/// This is a courtesy check only: nothing is reserved, and the authoritative
/// check happens again when the request is approved.
///
/// # Errors
///
/// Returns `DomainError::InsufficientBalance` if the range is longer than the
/// current balance.
pub fn check_submission(balance: LeaveBalance, range: &DateRange) -> Result<(), DomainError> {
    let requested: u32 = range.days();
    if !balance.covers(requested) {
        return Err(DomainError::InsufficientBalance {
            available: balance.days(),
            requested,
        });
    }
    Ok(())
}

/// Summary of an employee's leave position across all of their requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveLedgerSummary {
    /// The allotment the employee was granted.
    pub allotment: u32,
    /// Days held by approved requests.
    pub approved_days: u32,
    /// Days requested but not yet decided.
    pub pending_days: u32,
    /// `allotment - approved_days`. Negative only if the stored data is corrupt.
    pub expected_balance: i64,
}

/// Computes what an employee's balance must be given their requests.
///
/// Pending and rejected requests never count against the balance.
pub fn summarize_ledger<'a, I>(allotment: u32, requests: I) -> LeaveLedgerSummary
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    let mut approved_days: u32 = 0;
    let mut pending_days: u32 = 0;

    for request in requests {
        match request.status {
            LeaveStatus::Approved => approved_days = approved_days.saturating_add(request.days()),
            LeaveStatus::Pending => pending_days = pending_days.saturating_add(request.days()),
            LeaveStatus::Rejected => {}
        }
    }

    LeaveLedgerSummary {
        allotment,
        approved_days,
        pending_days,
        expected_balance: i64::from(allotment) - i64::from(approved_days),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn range(start: time::Date, end: time::Date) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn test_debit_within_balance() {
        let balance: LeaveBalance = LeaveBalance::new(10);
        let after: LeaveBalance = balance.debit(4).unwrap();
        assert_eq!(after.days(), 6);
    }

    #[test]
    fn test_debit_entire_balance_reaches_zero() {
        let after: LeaveBalance = LeaveBalance::new(5).debit(5).unwrap();
        assert_eq!(after.days(), 0);
    }

    #[test]
    fn test_debit_beyond_balance_fails() {
        let result = LeaveBalance::new(3).debit(4);
        assert_eq!(
            result,
            Err(DomainError::InsufficientBalance {
                available: 3,
                requested: 4
            })
        );
    }

    #[test]
    fn test_credit_has_no_ceiling() {
        let after: LeaveBalance = LeaveBalance::new(36).credit(5);
        assert_eq!(after.days(), 41);
    }

    #[test]
    fn test_effect_apply_and_delta() {
        let balance: LeaveBalance = LeaveBalance::new(10);
        assert_eq!(LedgerEffect::None.apply_to(balance).unwrap().days(), 10);
        assert_eq!(LedgerEffect::Debit(5).apply_to(balance).unwrap().days(), 5);
        assert_eq!(LedgerEffect::Credit(5).apply_to(balance).unwrap().days(), 15);
        assert_eq!(LedgerEffect::Debit(5).delta(), -5);
        assert_eq!(LedgerEffect::Credit(2).delta(), 2);
        assert_eq!(LedgerEffect::None.delta(), 0);
    }

    #[test]
    fn test_submission_check_counts_both_endpoints() {
        let five_days: DateRange = range(date!(2026 - 03 - 01), date!(2026 - 03 - 05));
        assert!(check_submission(LeaveBalance::new(5), &five_days).is_ok());
        assert_eq!(
            check_submission(LeaveBalance::new(4), &five_days),
            Err(DomainError::InsufficientBalance {
                available: 4,
                requested: 5
            })
        );
    }

    #[test]
    fn test_summary_only_counts_approved_against_balance() {
        let mut approved: LeaveRequest =
            LeaveRequest::new(1, range(date!(2026 - 01 - 10), date!(2026 - 01 - 12)));
        approved.status = LeaveStatus::Approved;
        let pending: LeaveRequest =
            LeaveRequest::new(1, range(date!(2026 - 02 - 01), date!(2026 - 02 - 07)));
        let mut rejected: LeaveRequest =
            LeaveRequest::new(1, range(date!(2026 - 04 - 01), date!(2026 - 04 - 02)));
        rejected.status = LeaveStatus::Rejected;

        let summary: LeaveLedgerSummary = summarize_ledger(36, [&approved, &pending, &rejected]);

        assert_eq!(summary.approved_days, 3);
        assert_eq!(summary.pending_days, 7);
        assert_eq!(summary.expected_balance, 33);
    }
}
