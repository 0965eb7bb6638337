// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event inserts
//! - `members`: Member directory administration
//! - `shifts`: Shift creation
//! - `transition`: Orchestration: storing a `TransitionResult` atomically

pub mod audit;
pub mod members;
pub mod shifts;
pub mod transition;

pub use audit::persist_audit_event;
pub use members::{create_member, deactivate_member};
pub use shifts::create_shift;
pub use transition::{PersistTransitionResult, persist_transition};
