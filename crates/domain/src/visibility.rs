// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based row visibility.
//!
//! Every listing of leave requests, courses, or mandates is filtered through
//! [`scope_rows`]. The rules are deliberately asymmetric:
//!
//! - Managers see every row.
//! - Operators see only rows they own.
//! - Supervisors see their own leave plus the leave of operators on their
//!   shift. For courses and mandates supervisors get the operator rule.

use crate::types::{LeaveRequest, NominableRecord, Principal, RecordKind, Role, RowOwner};
use serde::{Deserialize, Serialize};

/// The listing a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Leave,
    Course,
    Mandate,
}

impl From<RecordKind> for RowKind {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Course => Self::Course,
            RecordKind::Mandate => Self::Mandate,
        }
    }
}

/// A listed row that carries its owner's identity.
pub trait ScopedRow {
    /// The employee who owns this row.
    fn owner(&self) -> &RowOwner;

    /// Which listing this row belongs to.
    fn row_kind(&self) -> RowKind;
}

/// A leave request annotated with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveView {
    pub leave: LeaveRequest,
    pub owner: RowOwner,
}

impl ScopedRow for LeaveView {
    fn owner(&self) -> &RowOwner {
        &self.owner
    }

    fn row_kind(&self) -> RowKind {
        RowKind::Leave
    }
}

/// A course or mandate annotated with its assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub record: NominableRecord,
    pub owner: RowOwner,
}

impl ScopedRow for AssignmentView {
    fn owner(&self) -> &RowOwner {
        &self.owner
    }

    fn row_kind(&self) -> RowKind {
        RowKind::from(self.record.kind)
    }
}

/// Whether `principal` may see a row of `kind` owned by `owner`.
#[must_use]
pub fn is_visible(principal: &Principal, kind: RowKind, owner: &RowOwner) -> bool {
    if principal.is_manager() || owner.employee_id == principal.employee_id {
        return true;
    }

    match (principal.role, kind) {
        (Role::Supervisor, RowKind::Leave) => {
            owner.role == Role::Operator
                && principal.shift.is_some()
                && owner.shift == principal.shift
        }
        _ => false,
    }
}

/// Filters `rows` down to the ones `principal` may see, preserving order.
#[must_use]
pub fn scope_rows<T: ScopedRow>(principal: &Principal, rows: Vec<T>) -> Vec<T> {
    if principal.is_manager() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| is_visible(principal, row.row_kind(), row.owner()))
        .collect()
}
