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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use shift_roster_domain::{Employee, RecordKind, Role};

/// The employee who performed an audited action.
///
/// The name is captured at the time of the action so the log stays readable
/// after the employee is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting employee. `None` once that employee has been deleted.
    pub employee_id: Option<i64>,
    /// The acting employee's display name.
    pub name: String,
}

impl Actor {
    /// Creates a new Actor for a live employee.
    #[must_use]
    pub const fn new(employee_id: i64, name: String) -> Self {
        Self {
            employee_id: Some(employee_id),
            name,
        }
    }

    /// Creates an Actor whose employee record no longer exists.
    #[must_use]
    pub const fn detached(name: String) -> Self {
        Self {
            employee_id: None,
            name,
        }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`ApproveLeave`", "`CreateEmployee`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// What an action was performed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// The kind of entity (e.g., "employee", "leave", "course").
    pub target_type: String,
    /// A human readable name for the entity, if it has one.
    pub target_name: Option<String>,
}

impl Target {
    /// Creates a new Target.
    #[must_use]
    pub const fn new(target_type: String, target_name: Option<String>) -> Self {
        Self {
            target_type,
            target_name,
        }
    }

    /// Targets an employee by name.
    #[must_use]
    pub fn employee(employee: &Employee) -> Self {
        Self::new(String::from("employee"), Some(employee.name.clone()))
    }

    /// Targets the leave request of the named employee.
    #[must_use]
    pub fn leave(owner_name: &str) -> Self {
        Self::new(String::from("leave"), Some(owner_name.to_string()))
    }

    /// Targets a course or mandate by title.
    #[must_use]
    pub fn record(kind: RecordKind, title: &str) -> Self {
        Self::new(kind.as_str().to_string(), Some(title.to_string()))
    }
}

/// An immutable audit event representing one state change.
///
/// Every successful state change produces exactly one audit event, written
/// in the same transaction as the change itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The persisted identifier. `None` until the event is stored.
    pub event_id: Option<i64>,
    /// The employee who initiated this state change.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The entity that was changed.
    pub target: Target,
    /// When the event was recorded, as reported by the store.
    pub created_at: Option<String>,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent`.
    #[must_use]
    pub const fn new(actor: Actor, action: Action, target: Target) -> Self {
        Self {
            event_id: None,
            actor,
            action,
            target,
            created_at: None,
        }
    }

    /// Creates an `AuditEvent` read back from storage.
    #[must_use]
    pub const fn with_id(
        event_id: i64,
        actor: Actor,
        action: Action,
        target: Target,
        created_at: Option<String>,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            actor,
            action,
            target,
            created_at,
        }
    }
}

/// Builds an actor from an authenticated employee.
///
/// Returns `None` for an employee that has not been persisted.
#[must_use]
pub fn actor_for(employee: &Employee) -> Option<Actor> {
    employee
        .employee_id
        .map(|id| Actor::new(id, employee.name.clone()))
}

/// Describes a role for audit details, e.g. "role: supervisor".
#[must_use]
pub fn role_detail(role: Role) -> String {
    format!("role: {role}")
}
