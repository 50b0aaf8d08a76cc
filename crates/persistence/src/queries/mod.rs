// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Activity log queries
//! - `employees`: Employee and credential lookups
//! - `leaves`: Leave request lookups and owner-annotated listings
//! - `records`: Course and mandate listings and nomination inputs
//! - `sessions`: Session lookups
//! - `stats`: Dashboard aggregation

pub mod audit;
pub mod employees;
pub mod leaves;
pub mod records;
pub mod sessions;
pub mod stats;

use num_traits::ToPrimitive;
use shift_roster_domain::{LeaveStatus, RecordKind, Role, Shift, parse_date};
use std::str::FromStr;
use time::Date;

use crate::error::PersistenceError;

pub fn decode_role(value: &str) -> Result<Role, PersistenceError> {
    Role::from_str(value).map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub fn decode_shift(value: Option<&str>) -> Result<Option<Shift>, PersistenceError> {
    value
        .map(Shift::from_str)
        .transpose()
        .map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub fn decode_status(value: &str) -> Result<LeaveStatus, PersistenceError> {
    LeaveStatus::from_str(value).map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub fn decode_kind(value: &str) -> Result<RecordKind, PersistenceError> {
    RecordKind::from_str(value).map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub fn decode_date(field: &'static str, value: &str) -> Result<Date, PersistenceError> {
    parse_date(field, value).map_err(|e| PersistenceError::CorruptRow(e.to_string()))
}

pub fn decode_balance(value: i32) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::CorruptRow(format!("Negative leave balance stored: {value}"))
    })
}

pub fn encode_days(days: u32) -> Result<i32, PersistenceError> {
    days.to_i32()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Day count out of range: {days}")))
}
