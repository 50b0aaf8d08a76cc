// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runtime settings consumed by the API handlers.

use time::Duration;

/// Default annual leave allotment granted to new employees, in days.
pub const DEFAULT_LEAVE_ALLOTMENT: u16 = 36;

/// Default session lifetime, in hours.
pub const DEFAULT_SESSION_HOURS: i64 = 8;

/// Longest session lifetime accepted, in hours (one leap year).
pub const MAX_SESSION_HOURS: i64 = 24 * 366;

/// Settings fixed at startup and passed into every handler that needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterConfig {
    /// Leave days credited to an employee when they are created.
    pub default_leave_allotment: u16,
    /// How long a session stays valid after login.
    pub session_duration: Duration,
}

impl RosterConfig {
    /// Creates a configuration from an allotment and a session lifetime in hours.
    ///
    /// The lifetime is clamped to `1..=MAX_SESSION_HOURS`.
    #[must_use]
    pub const fn new(default_leave_allotment: u16, session_hours: i64) -> Self {
        let session_hours: i64 = if session_hours < 1 {
            1
        } else if session_hours > MAX_SESSION_HOURS {
            MAX_SESSION_HOURS
        } else {
            session_hours
        };

        Self {
            default_leave_allotment,
            session_duration: Duration::hours(session_hours),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEAVE_ALLOTMENT, DEFAULT_SESSION_HOURS)
    }
}
