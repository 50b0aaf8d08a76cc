// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use shift_roster_domain::{Employee, LeaveView, Role, Shift};
use time::Date;

/// An employee row together with its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeData {
    /// The employee profile. `employee_id` is always `Some`.
    pub employee: Employee,
    /// The bcrypt hash of the employee's password.
    pub password_hash: String,
    /// When the row was created.
    pub created_at: String,
}

impl EmployeeData {
    /// The persisted employee ID.
    #[must_use]
    pub fn employee_id(&self) -> i64 {
        self.employee.employee_id.unwrap_or_default()
    }
}

/// Profile fields a manager may change on an employee.
///
/// The leave balance is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: String,
    pub username: String,
    pub role: Role,
    pub shift: Option<Shift>,
    pub join_date: Date,
    /// A new plain-text password, hashed before storage.
    pub password: Option<String>,
}

/// A login session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub employee_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Identifiers produced by committing a leave transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistLeaveResult {
    /// The affected (or newly created) leave request.
    pub leave_id: i64,
    /// The activity log entry recording the transition.
    pub event_id: i64,
}

/// Non-manager headcount for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCount {
    pub shift: Shift,
    pub count: i64,
}

/// Aggregate counts for the manager dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub supervisors: i64,
    pub operators: i64,
    pub pending_leaves: i64,
    pub approved_leaves: i64,
    pub total_courses: i64,
    pub total_mandates: i64,
    pub by_shift: Vec<ShiftCount>,
    pub recent_leaves: Vec<LeaveView>,
}
