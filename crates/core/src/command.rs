// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_roster_domain::{DateRange, LeaveAction};

/// A command represents user intent against one employee's leave ledger.
///
/// Commands are the only way to request leave state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new pending request for the ledger's employee.
    SubmitLeave {
        /// The requested days.
        range: DateRange,
    },
    /// Approve a pending request, debiting its days.
    ApproveLeave {
        /// The request to approve.
        leave_id: i64,
    },
    /// Reject a request, refunding its days if it was approved.
    RejectLeave {
        /// The request to reject.
        leave_id: i64,
    },
    /// Delete a request, refunding its days if it was approved.
    DeleteLeave {
        /// The request to delete.
        leave_id: i64,
    },
}

impl Command {
    /// The name recorded in the audit log for this command.
    #[must_use]
    pub const fn audit_name(&self) -> &'static str {
        match self {
            Self::SubmitLeave { .. } => "SubmitLeave",
            Self::ApproveLeave { .. } => "ApproveLeave",
            Self::RejectLeave { .. } => "RejectLeave",
            Self::DeleteLeave { .. } => "DeleteLeave",
        }
    }

    /// Builds the command that applies a lifecycle `action` to an existing request.
    #[must_use]
    pub const fn decision(action: LeaveAction, leave_id: i64) -> Self {
        match action {
            LeaveAction::Approve => Self::ApproveLeave { leave_id },
            LeaveAction::Reject => Self::RejectLeave { leave_id },
            LeaveAction::Delete => Self::DeleteLeave { leave_id },
        }
    }
}
