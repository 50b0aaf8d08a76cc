// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use shift_roster_audit::{Action, Actor, AuditEvent, Target};
use shift_roster_domain::{Employee, Principal, Role, Shift};
use shift_roster_persistence::{EmployeeData, Persistence, PersistenceError, SessionData};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// An authenticated employee.
///
/// Carries the resolved principal used for authorization and visibility
/// scoping, plus the names needed for audit attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The identity used for authorization decisions.
    pub principal: Principal,
    /// The employee's display name.
    pub name: String,
    /// The employee's login name.
    pub username: String,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `principal` - The resolved identity
    /// * `name` - The display name
    /// * `username` - The login name
    #[must_use]
    pub const fn new(principal: Principal, name: String, username: String) -> Self {
        Self {
            principal,
            name,
            username,
        }
    }

    /// Builds an actor from a stored employee.
    ///
    /// Returns `None` for an employee that has not been persisted.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Option<Self> {
        employee.principal().map(|principal| {
            Self::new(
                principal,
                employee.name.clone(),
                employee.username.clone(),
            )
        })
    }

    /// The employee ID of this actor.
    #[must_use]
    pub const fn employee_id(&self) -> i64 {
        self.principal.employee_id
    }

    /// The role of this actor.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.principal.role
    }

    /// The shift of this actor, if any.
    #[must_use]
    pub const fn shift(&self) -> Option<Shift> {
        self.principal.shift
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated employee.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.principal.employee_id, self.name.clone())
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Every administrative action is reserved for managers. Leave submission
/// is the one action managers may not perform.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may administer employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a manager.
    pub fn authorize_manage_employees(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_manager(actor, "manage_employees")
    }

    /// Checks if an actor may approve, reject, or delete leave requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a manager.
    pub fn authorize_decide_leave(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_manager(actor, "decide_leave")
    }

    /// Checks if an actor may create, update, or delete courses and mandates.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a manager.
    pub fn authorize_manage_records(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_manager(actor, "manage_records")
    }

    /// Checks if an actor may view nomination rankings.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a manager.
    pub fn authorize_view_nominations(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_manager(actor, "view_nominations")
    }

    /// Checks if an actor may view dashboard statistics and the activity log.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a manager.
    pub fn authorize_view_stats(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_manager(actor, "view_stats")
    }

    /// Checks if an actor may submit leave for themselves.
    ///
    /// Managers hold no shift and do not take leave through the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a manager.
    pub fn authorize_submit_leave(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role() {
            Role::Supervisor | Role::Operator => Ok(()),
            Role::Manager => Err(AuthError::Unauthorized {
                action: String::from("submit_leave"),
                required_role: String::from("supervisor or operator"),
            }),
        }
    }

    fn require_manager(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role() {
            Role::Manager => Ok(()),
            Role::Supervisor | Role::Operator => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("manager"),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates an employee and creates a session.
    ///
    /// Expired sessions are purged on every login.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The login name (case-sensitive)
    /// * `password` - The plaintext password
    /// * `session_duration` - How long the new session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `expires_at`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the session lifetime
    /// pushes the expiry past the representable range, or the session cannot
    /// be created.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        session_duration: Duration,
    ) -> Result<(String, AuthenticatedActor, String), AuthError> {
        let data: EmployeeData = persistence
            .get_employee_by_username(username)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(Self::invalid_credentials)?;

        let password_valid: bool = Persistence::verify_password(password, &data.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_valid {
            debug!(username, "Rejected login with wrong password");
            return Err(Self::invalid_credentials());
        }

        let actor: AuthenticatedActor = AuthenticatedActor::from_employee(&data.employee)
            .ok_or_else(Self::invalid_credentials)?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let purged: usize = persistence
            .delete_expired_sessions(&Self::format_timestamp(now)?)
            .map_err(Self::map_persistence_error)?;
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }

        let session_token: String = Self::generate_session_token();
        let expires: OffsetDateTime = now
            .checked_add(session_duration)
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Session expiry is out of range"),
            })?;
        let expires_at: String = Self::format_timestamp(expires)?;

        let audit_event: AuditEvent = AuditEvent::new(
            actor.to_audit_actor(),
            Action::new(String::from("Login"), None),
            Target::employee(&data.employee),
        );

        persistence
            .create_session(
                &session_token,
                actor.employee_id(),
                &expires_at,
                &audit_event,
            )
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!(
            employee_id = actor.employee_id(),
            role = %actor.role(),
            "Employee logged in"
        );

        Ok((session_token, actor, expires_at))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or if its
    /// employee no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let data: EmployeeData = persistence
            .get_employee_by_id(session.employee_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Employee not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        AuthenticatedActor::from_employee(&data.employee).ok_or_else(|| {
            AuthError::AuthenticationFailed {
                reason: String::from("Employee not found"),
            }
        })
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    /// * `actor` - The actor who owns the session
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist.
    pub fn logout(
        persistence: &mut Persistence,
        session_token: &str,
        actor: &AuthenticatedActor,
    ) -> Result<(), AuthError> {
        let audit_event: AuditEvent = AuditEvent::new(
            actor.to_audit_actor(),
            Action::new(String::from("Logout"), None),
            Target::new(String::from("employee"), Some(actor.name.clone())),
        );

        persistence
            .delete_session(session_token, Some(&audit_event))
            .map_err(Self::map_persistence_error)?;

        info!(employee_id = actor.employee_id(), "Employee logged out");
        Ok(())
    }

    /// Formats a timestamp the way session expiries are stored.
    ///
    /// Stored expiries share one format, so they compare lexically.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, AuthError> {
        timestamp
            .format(&Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format timestamp: {e}"),
            })
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        format!(
            "session_{timestamp}_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid username or password"),
        }
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(_) => AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
