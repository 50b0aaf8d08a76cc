// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DateRange, Employee, Role, Shift};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Calendar date format accepted on every boundary.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validates that an employee's basic field constraints are met.
///
/// This function checks required fields and the role/shift pairing.
/// It does NOT check username uniqueness (that requires the store).
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The username is empty or contains whitespace
/// - A supervisor or operator has no shift
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    if employee.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    validate_username(&employee.username)?;
    validate_role_shift(employee.role, employee.shift)
}

/// Validates a login name.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` if the username is empty or contains
/// whitespace.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot contain whitespace",
        )));
    }
    Ok(())
}

/// Validates that a role that requires a shift has one.
///
/// # Errors
///
/// Returns `DomainError::MissingShift` for a supervisor or operator without a shift.
pub const fn validate_role_shift(role: Role, shift: Option<Shift>) -> Result<(), DomainError> {
    if role.requires_shift() && shift.is_none() {
        return Err(DomainError::MissingShift { role });
    }
    Ok(())
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        field,
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses a date that must be present.
///
/// # Errors
///
/// Returns `DomainError::MissingDate` if `value` is absent or blank, otherwise
/// any error from [`parse_date`].
pub fn parse_required_date(field: &'static str, value: Option<&str>) -> Result<Date, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(field, v),
        _ => Err(DomainError::MissingDate { field }),
    }
}

/// Formats a date the way it is accepted by [`parse_date`].
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parses both ends of a leave request into a range.
///
/// # Errors
///
/// Returns an error if either date is missing or malformed, or if the end
/// precedes the start.
pub fn parse_leave_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<DateRange, DomainError> {
    let start: Date = parse_required_date("start_date", start_date)?;
    let end: Date = parse_required_date("end_date", end_date)?;
    DateRange::new(start, end)
}

/// Validates the free-text fields of a course or mandate.
///
/// # Errors
///
/// Returns `DomainError::InvalidRecordField` if the title or location is blank.
pub fn validate_record_fields(title: &str, location: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidRecordField {
            field: "title",
            reason: String::from("Title cannot be empty"),
        });
    }
    if location.trim().is_empty() {
        return Err(DomainError::InvalidRecordField {
            field: "location",
            reason: String::from("Location cannot be empty"),
        });
    }
    Ok(())
}
