// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! Every mutation that changes roster state takes the `AuditEvent` describing
//! it and writes both inside one immediate transaction.
//!
//! ## Module Organization
//!
//! - `audit`: Activity log inserts
//! - `employees`: Employee lifecycle, credentials, and bootstrap
//! - `leaves`: Leave transitions and the conditional balance ledger
//! - `records`: Course and mandate lifecycle
//! - `sessions`: Session lifecycle

pub mod audit;
pub mod employees;
pub mod leaves;
pub mod records;
pub mod sessions;
