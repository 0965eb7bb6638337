// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use muster_domain::{Member, MemberId, ShiftMembership};

/// A command represents operator or member intent as data only.
///
/// Commands are the only way to request shift state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Persist a rotation proposal and start waiting for answers.
    ConfirmRotation {
        /// The full proposed membership list.
        members: Vec<ShiftMembership>,
    },
    /// A member offers to take the shift.
    Volunteer {
        /// The volunteering member.
        member_id: MemberId,
        /// Display name captured on the record.
        member_name: String,
        /// Avatar captured on the record.
        avatar: Option<String>,
    },
    /// An operator summons a member directly, bypassing rotation.
    AssignMember {
        /// The member to summon.
        member: Member,
    },
    /// Accept a pending volunteer.
    ApproveVolunteer {
        /// The volunteer.
        member_id: MemberId,
    },
    /// Turn a pending volunteer away. Removes the record.
    RejectVolunteer {
        /// The volunteer.
        member_id: MemberId,
    },
    /// A summoned member answers.
    RespondToSummon {
        /// The summoned member.
        member_id: MemberId,
        /// `true` to accept, `false` to decline.
        accept: bool,
    },
    /// Close the shift and credit the confirmed members.
    Finalize,
}

impl Command {
    /// The name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConfirmRotation { .. } => "ConfirmRotation",
            Self::Volunteer { .. } => "Volunteer",
            Self::AssignMember { .. } => "AssignMember",
            Self::ApproveVolunteer { .. } => "ApproveVolunteer",
            Self::RejectVolunteer { .. } => "RejectVolunteer",
            Self::RespondToSummon { .. } => "RespondToSummon",
            Self::Finalize => "Finalize",
        }
    }
}
