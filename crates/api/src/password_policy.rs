// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces password requirements for employee credentials.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 4 }
    }
}

impl PasswordPolicy {
    /// Validates a new password.
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password is too short.
    pub fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }
        Ok(())
    }
}
