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

mod apply;
mod command;
mod error;
mod event;
mod state;

#[cfg(test)]
mod tests;

use muster_domain::{DomainError, Member, RotationProposal, Shift, ShiftStatus, propose_rotation};
use time::OffsetDateTime;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use event::ShiftEvent;
pub use state::{MemberStatsUpdate, ShiftState, TransitionNotice, TransitionResult};

/// Computes a rotation proposal for an open shift.
///
/// This is a read-only operation that does not create audit events.
///
/// # Arguments
///
/// * `state` - The target shift
/// * `directory` - Snapshot of the member directory
/// * `previous_shift` - The shift that decides who is de-prioritized, if any
/// * `now` - Used as the join time of the proposed summonses
///
/// # Errors
///
/// Returns `DomainError::InvalidStateTransition` if the shift is not open.
pub fn preview_rotation(
    state: &ShiftState,
    directory: &[Member],
    previous_shift: Option<&Shift>,
    now: OffsetDateTime,
) -> Result<RotationProposal, CoreError> {
    if state.shift.status != ShiftStatus::Open {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStateTransition {
                shift_id: state.shift.id,
                status: state.shift.status,
                action: "propose rotation for",
            },
        ));
    }
    Ok(propose_rotation(
        &state.shift,
        directory,
        previous_shift,
        now,
    ))
}
