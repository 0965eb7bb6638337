// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event lookups and per-shift timelines
//! - `members`: Member directory snapshots
//! - `shifts`: Shifts with their membership lists

pub mod audit;
pub mod members;
pub mod shifts;

pub use audit::{get_audit_event, get_audit_timeline};
pub use members::{fetch_active_members, fetch_member, list_members};
pub use shifts::{fetch_most_recent_prior_shift, fetch_shift, list_shifts};
