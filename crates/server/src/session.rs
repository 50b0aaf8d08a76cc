// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token session extraction for the server.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use shift_roster_api::{AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for authenticated employees.
///
/// Validates `Authorization: Bearer <token>` against the session store
/// and yields the resolved actor together with the raw token, which
/// logout needs to revoke the session.
///
/// Every failure is answered with 401 before the handler runs.
pub struct SessionEmployee(pub AuthenticatedActor, pub String);

impl FromRequestParts<AppState> for SessionEmployee {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let actor: AuthenticatedActor =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            username = %actor.username,
            role = %actor.role(),
            "Session validated"
        );

        Ok(Self(actor, token.to_string()))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => reason,
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
        }
        .into_response()
    }
}
