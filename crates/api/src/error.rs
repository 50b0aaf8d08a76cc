// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use shift_roster::CoreError;
use shift_roster_domain::DomainError;
use shift_roster_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidName(_) => invalid_input("name", message),
        DomainError::InvalidUsername(_) => invalid_input("username", message),
        DomainError::InvalidRole(_) => invalid_input("role", message),
        DomainError::InvalidShift(_) | DomainError::MissingShift { .. } => {
            invalid_input("shift", message)
        }
        DomainError::InvalidLeaveStatus(_) => invalid_input("status", message),
        DomainError::InvalidRecordKind(_) => invalid_input("kind", message),
        DomainError::InvalidRecordField { field, .. }
        | DomainError::MissingDate { field }
        | DomainError::DateParseError { field, .. } => invalid_input(field, message),
        DomainError::InvalidDateRange { .. } => invalid_input("end_date", message),
        DomainError::InsufficientBalance { .. } => rule_violation("sufficient_balance", message),
        DomainError::InvalidTransition { .. } => {
            rule_violation("leave_status_transition", message)
        }
        DomainError::DuplicateUsername(_) => rule_violation("unique_username", message),
        DomainError::ManagerNotDeletable(_) => rule_violation("manager_not_deletable", message),
        DomainError::LeaveNotFound(_) => not_found("Leave request", message),
        DomainError::EmployeeNotFound(_) => not_found("Employee", message),
        DomainError::RecordNotFound { kind, .. } => not_found(kind.display_name(), message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Rule failures detected at commit time surface exactly like their domain
/// counterparts; anything else is an internal fault.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmployeeNotFound(id) => {
            translate_domain_error(DomainError::EmployeeNotFound(id))
        }
        PersistenceError::LeaveNotFound(id) => translate_domain_error(DomainError::LeaveNotFound(id)),
        PersistenceError::RecordNotFound { kind, record_id } => {
            translate_domain_error(DomainError::RecordNotFound { kind, record_id })
        }
        PersistenceError::DuplicateUsername(username) => {
            translate_domain_error(DomainError::DuplicateUsername(username))
        }
        PersistenceError::InsufficientBalance {
            available,
            requested,
            ..
        } => translate_domain_error(DomainError::InsufficientBalance {
            available,
            requested,
        }),
        PersistenceError::StaleLeaveStatus { leave_id, expected } => ApiError::DomainRuleViolation {
            rule: String::from("leave_status_transition"),
            message: format!(
                "Leave request {leave_id} is no longer {expected}; it was changed by another request"
            ),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}
