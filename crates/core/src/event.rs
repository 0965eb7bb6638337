// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use muster_domain::{MemberId, ParticipationStatus, ShiftId, ShiftStatus};

/// Something observers of a shift may want to hear about.
///
/// Events are produced by transitions and published only after the
/// transition has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftEvent {
    /// A member's record was created, changed, or removed.
    MembershipChanged {
        /// The shift.
        shift_id: ShiftId,
        /// The member.
        member_id: MemberId,
        /// The new record status, or `None` when the record was removed.
        status: Option<ParticipationStatus>,
    },
    /// The shift moved to a new lifecycle state.
    StatusChanged {
        /// The shift.
        shift_id: ShiftId,
        /// Previous state.
        from: ShiftStatus,
        /// New state.
        to: ShiftStatus,
    },
    /// The shift was closed.
    ShiftFinalized {
        /// The shift.
        shift_id: ShiftId,
        /// Members credited with the shift.
        confirmed: Vec<MemberId>,
    },
}

impl ShiftEvent {
    /// The shift the event is about.
    #[must_use]
    pub const fn shift_id(&self) -> ShiftId {
        match self {
            Self::MembershipChanged { shift_id, .. }
            | Self::StatusChanged { shift_id, .. }
            | Self::ShiftFinalized { shift_id, .. } => *shift_id,
        }
    }
}
