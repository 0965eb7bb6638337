// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::ShiftEvent;
use muster_audit::{AuditEvent, StateSnapshot};
use muster_domain::{MemberId, ParticipationStatus, Shift};
use time::OffsetDateTime;

/// A shift as loaded from storage, together with its version.
///
/// The version is the optimistic concurrency token: a transition computed
/// from this state may only be stored if the stored version is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftState {
    /// The shift and its membership list.
    pub shift: Shift,
    /// Stored version the shift was read at.
    pub version: i64,
}

impl ShiftState {
    /// Wraps a loaded shift.
    #[must_use]
    pub const fn new(shift: Shift, version: i64) -> Self {
        Self { shift, version }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let count = |status: ParticipationStatus| {
            self.shift
                .members
                .iter()
                .filter(|m| m.participation_status == status)
                .count()
        };
        StateSnapshot::new(format!(
            "shift={},status={},vacancies={},volunteer_pending={},pending={},confirmed={},declined={}",
            self.shift.id,
            self.shift.status,
            self.shift.vacancies,
            count(ParticipationStatus::VolunteerPending),
            count(ParticipationStatus::Pending),
            count(ParticipationStatus::Confirmed),
            count(ParticipationStatus::Declined),
        ))
    }
}

/// One confirmed member to credit when a shift is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberStatsUpdate {
    /// The member to credit.
    pub member_id: MemberId,
    /// Becomes the member's last shift date.
    pub finalized_at: OffsetDateTime,
}

/// Non-fatal conditions an operator should know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionNotice {
    /// The shift was confirmed with fewer participants than vacancies.
    Understaffed {
        /// The target headcount.
        vacancies: u32,
        /// Members actually participating.
        participating: usize,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: ShiftState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Events to publish once the transition is stored.
    pub events: Vec<ShiftEvent>,
    /// Member statistics to apply together with the transition.
    pub stats_updates: Vec<MemberStatsUpdate>,
    /// Warnings for the operator.
    pub notices: Vec<TransitionNotice>,
}
