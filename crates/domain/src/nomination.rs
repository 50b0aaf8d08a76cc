// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fairness ranking for course and mandate nominations.
//!
//! ## Priority Rules (Authoritative)
//!
//! Candidates are ordered by:
//! 1. Never assigned a record of this kind (first)
//! 2. Most recent assignment date (oldest first)
//! 3. Join date (earliest first)
//! 4. Employee ID (lowest first), so the ranking is total
//!
//! ## Invariants
//!
//! - Managers are never nominated
//! - Courses and mandates are ranked independently; the caller supplies
//!   `last_record_date` for exactly one kind

use crate::types::{Role, Shift};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::Date;

/// An employee considered for nomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationCandidate {
    /// The candidate's canonical ID.
    pub employee_id: i64,
    /// The candidate's display name.
    pub name: String,
    /// The candidate's role.
    pub role: Role,
    /// The candidate's shift.
    pub shift: Option<Shift>,
    /// The date the candidate joined.
    pub join_date: Date,
    /// The date of the candidate's latest record of the ranked kind, if any.
    pub last_record_date: Option<Date>,
}

/// A candidate's place in the nomination ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationPosition {
    /// The 1-based rank (1 = most deserving).
    pub position: usize,
    /// The ranked candidate.
    pub candidate: NominationCandidate,
}

/// Ranks the nomination pool.
///
/// Managers are removed first. When `role_filter` names a role, only
/// candidates holding that role remain. A manager filter yields an empty
/// ranking.
#[must_use]
pub fn rank_nominees(
    pool: Vec<NominationCandidate>,
    role_filter: Option<Role>,
) -> Vec<NominationPosition> {
    let mut eligible: Vec<NominationCandidate> = pool
        .into_iter()
        .filter(|c| c.role != Role::Manager)
        .filter(|c| role_filter.is_none_or(|role| c.role == role))
        .collect();

    eligible.sort_by(compare_priority);

    eligible
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| NominationPosition {
            position: index + 1,
            candidate,
        })
        .collect()
}

/// Compares two candidates by nomination priority.
///
/// Returns `Ordering::Less` if `a` should be nominated before `b`.
#[must_use]
pub fn compare_priority(a: &NominationCandidate, b: &NominationCandidate) -> Ordering {
    let by_last_record: Ordering = match (a.last_record_date, b.last_record_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
    };

    by_last_record
        .then_with(|| a.join_date.cmp(&b.join_date))
        .then_with(|| a.employee_id.cmp(&b.employee_id))
}
