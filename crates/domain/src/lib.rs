// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod directory;
mod eligibility;
mod error;
mod fair_order;
mod partition;
mod rotation;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use directory::list_eligible_candidates;
pub use eligibility::{Eligibility, exclude_already_assigned, vacancies_needed};
pub use fair_order::{compare_fairness, sort_fairly};
pub use partition::{PriorityPartition, find_previous_shift, partition};
pub use rotation::{InsufficientCandidates, RotationProposal, propose_rotation};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Member, MemberCategory, MemberId, MembershipOrigin, ParticipationStatus, Shift, ShiftId,
    ShiftMembership, ShiftStatus,
};
pub use validation::{
    validate_member_can_serve, validate_member_name, validate_shift_fields,
    validate_unique_membership,
};
