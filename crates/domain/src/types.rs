// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The fixed set of roles an employee may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control over the roster.
    Manager,
    /// Oversees the operators of one shift.
    Supervisor,
    /// Individual contributor on a shift.
    Operator,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Supervisor => "supervisor",
            Self::Operator => "operator",
        }
    }

    /// Whether employees with this role must be assigned to a shift.
    #[must_use]
    pub const fn requires_shift(&self) -> bool {
        matches!(self, Self::Supervisor | Self::Operator)
    }

    /// Sort key used when listing employees: managers, then supervisors, then operators.
    #[must_use]
    pub const fn listing_rank(&self) -> u8 {
        match self {
            Self::Manager => 0,
            Self::Supervisor => 1,
            Self::Operator => 2,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "supervisor" => Ok(Self::Supervisor),
            "operator" => Ok(Self::Operator),
            _ => Err(DomainError::InvalidRole(format!("Unknown role: {s}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the four rotating shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    A,
    B,
    C,
    D,
}

impl Shift {
    /// Converts this shift to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(DomainError::InvalidShift(format!("Unknown shift: {s}"))),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved identity of the caller acting on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The acting employee.
    pub employee_id: i64,
    /// The acting employee's role.
    pub role: Role,
    /// The acting employee's shift (`None` for managers).
    pub shift: Option<Shift>,
}

impl Principal {
    /// Creates a new `Principal`.
    #[must_use]
    pub const fn new(employee_id: i64, role: Role, shift: Option<Shift>) -> Self {
        Self {
            employee_id,
            role,
            shift,
        }
    }

    /// Returns whether this principal is a manager.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }
}

/// An employee on the roster.
///
/// `annual_leave_balance` is owned by the leave ledger: profile edits never
/// write it, only approved, refunded, or deleted leave requests move it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical identifier. `None` until persisted.
    pub employee_id: Option<i64>,
    /// The display name.
    pub name: String,
    /// The globally unique login name.
    pub username: String,
    /// The employee's role.
    pub role: Role,
    /// The employee's shift. Always `None` for managers.
    pub shift: Option<Shift>,
    /// The date the employee joined.
    pub join_date: Date,
    /// Remaining annual leave, in whole days.
    pub annual_leave_balance: u32,
}

impl Employee {
    /// Creates a new, not yet persisted employee holding the given allotment.
    ///
    /// Managers never carry a shift; any shift supplied for a manager is dropped.
    #[must_use]
    pub const fn new(
        name: String,
        username: String,
        role: Role,
        shift: Option<Shift>,
        join_date: Date,
        allotment: u32,
    ) -> Self {
        Self {
            employee_id: None,
            name,
            username,
            role,
            shift: if role.requires_shift() { shift } else { None },
            join_date,
            annual_leave_balance: allotment,
        }
    }

    /// Creates an employee with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        employee_id: i64,
        name: String,
        username: String,
        role: Role,
        shift: Option<Shift>,
        join_date: Date,
        annual_leave_balance: u32,
    ) -> Self {
        Self {
            employee_id: Some(employee_id),
            name,
            username,
            role,
            shift,
            join_date,
            annual_leave_balance,
        }
    }

    /// Returns the principal this employee acts as, if persisted.
    #[must_use]
    pub const fn principal(&self) -> Option<Principal> {
        match self.employee_id {
            Some(id) => Some(Principal::new(id, self.role, self.shift)),
            None => None,
        }
    }
}

/// The status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Submitted, awaiting a manager decision. Reserves no balance.
    #[default]
    Pending,
    /// Approved; its days have been debited from the owner's balance.
    Approved,
    /// Rejected; holds no balance.
    Rejected,
}

impl LeaveStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLeaveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inclusive calendar date range with `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange {
                start_date: start,
                end_date: end,
            });
        }
        Ok(Self { start, end })
    }

    /// The first day of leave.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// The last day of leave.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of days covered, counting both endpoints.
    #[must_use]
    pub fn days(&self) -> u32 {
        let span: i64 = (self.end - self.start).whole_days() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }
}

/// A paid-leave request.
///
/// The date range is fixed at creation; the day count is always derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The canonical identifier. `None` until persisted.
    pub leave_id: Option<i64>,
    /// The employee who owns this request.
    pub employee_id: i64,
    /// The requested days.
    pub range: DateRange,
    /// The current lifecycle status.
    pub status: LeaveStatus,
    /// Creation timestamp as recorded by the store.
    pub created_at: Option<String>,
}

impl LeaveRequest {
    /// Creates a new pending request that has not been persisted yet.
    #[must_use]
    pub const fn new(employee_id: i64, range: DateRange) -> Self {
        Self {
            leave_id: None,
            employee_id,
            range,
            status: LeaveStatus::Pending,
            created_at: None,
        }
    }

    /// Creates a request with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        leave_id: i64,
        employee_id: i64,
        range: DateRange,
        status: LeaveStatus,
        created_at: Option<String>,
    ) -> Self {
        Self {
            leave_id: Some(leave_id),
            employee_id,
            range,
            status,
            created_at,
        }
    }

    /// Number of leave days this request covers.
    #[must_use]
    pub fn days(&self) -> u32 {
        self.range.days()
    }
}

/// The two fairness-rotated assignment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A training course.
    Course,
    /// An out-of-station mandate.
    Mandate,
}

impl RecordKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Mandate => "mandate",
        }
    }

    /// Human readable name used in messages and audit targets.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Mandate => "Mandate",
        }
    }
}

impl FromStr for RecordKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "course" => Ok(Self::Course),
            "mandate" => Ok(Self::Mandate),
            _ => Err(DomainError::InvalidRecordKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A course or mandate assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominableRecord {
    /// The canonical identifier. `None` until persisted.
    pub record_id: Option<i64>,
    /// Course or mandate.
    pub kind: RecordKind,
    /// The title.
    pub title: String,
    /// Where it takes place.
    pub location: String,
    /// When it takes place.
    pub date: Date,
    /// The assigned employee.
    pub employee_id: i64,
}

impl NominableRecord {
    /// Creates a new, not yet persisted record.
    #[must_use]
    pub const fn new(
        kind: RecordKind,
        title: String,
        location: String,
        date: Date,
        employee_id: i64,
    ) -> Self {
        Self {
            record_id: None,
            kind,
            title,
            location,
            date,
            employee_id,
        }
    }

    /// Creates a record with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        record_id: i64,
        kind: RecordKind,
        title: String,
        location: String,
        date: Date,
        employee_id: i64,
    ) -> Self {
        Self {
            record_id: Some(record_id),
            kind,
            title,
            location,
            date,
            employee_id,
        }
    }
}

/// The owning employee's identity, denormalized onto listed rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOwner {
    /// The owning employee.
    pub employee_id: i64,
    /// The owning employee's display name.
    pub name: String,
    /// The owning employee's role.
    pub role: Role,
    /// The owning employee's shift.
    pub shift: Option<Shift>,
}
