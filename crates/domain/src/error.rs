// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{MemberId, ParticipationStatus, ShiftId, ShiftStatus};
use thiserror::Error;

/// Errors that can occur during domain validation and shift transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The referenced shift does not exist.
    #[error("Shift {0} not found")]
    ShiftNotFound(ShiftId),
    /// The referenced member does not exist in the directory.
    #[error("Member {0} not found")]
    MemberNotFound(MemberId),
    /// The member exists but is not active.
    #[error("Member {0} is not active")]
    MemberInactive(MemberId),
    /// The member is an applicant and cannot be put on duty.
    #[error("Member {0} is not an operational member")]
    MemberNotOperational(MemberId),
    /// The member already has a record in the shift.
    #[error("Member {member_id} is already assigned to shift {shift_id}")]
    AlreadyAssigned {
        /// The shift.
        shift_id: ShiftId,
        /// The duplicate member.
        member_id: MemberId,
    },
    /// A summons response came from a member with no record in the shift.
    #[error("Member {member_id} was not summoned to shift {shift_id}")]
    NotSummoned {
        /// The shift.
        shift_id: ShiftId,
        /// The responding member.
        member_id: MemberId,
    },
    /// The member holds no record in the shift.
    #[error("Member {member_id} has no record in shift {shift_id}")]
    MembershipNotFound {
        /// The shift.
        shift_id: ShiftId,
        /// The member that was looked up.
        member_id: MemberId,
    },
    /// The shift's lifecycle state does not permit the requested action.
    #[error("Cannot {action} shift {shift_id} while it is {status}")]
    InvalidStateTransition {
        /// The shift.
        shift_id: ShiftId,
        /// The state the shift is in.
        status: ShiftStatus,
        /// What was attempted.
        action: &'static str,
    },
    /// A membership record is not in the state the action requires.
    #[error(
        "Cannot {action} member {member_id} in shift {shift_id}: record is {actual}, expected {expected}"
    )]
    InvalidParticipationState {
        /// The shift.
        shift_id: ShiftId,
        /// The member whose record was targeted.
        member_id: MemberId,
        /// What was attempted.
        action: &'static str,
        /// The state the record needed to be in.
        expected: ParticipationStatus,
        /// The state the record is in.
        actual: ParticipationStatus,
    },
    /// The shift has already been finalized.
    #[error("Shift {0} is already finished")]
    AlreadyFinished(ShiftId),
    /// A proposal would put more members on the shift than it has vacancies.
    #[error("Shift {shift_id} has {vacancies} vacancies but {requested} participating members were requested")]
    VacanciesExceeded {
        /// The shift.
        shift_id: ShiftId,
        /// The target headcount.
        vacancies: u32,
        /// The participating count the proposal would produce.
        requested: usize,
    },
    /// A proposal lists the same member more than once.
    #[error("Member {member_id} appears more than once in the proposal for shift {shift_id}")]
    DuplicateMembership {
        /// The shift.
        shift_id: ShiftId,
        /// The repeated member.
        member_id: MemberId,
    },
    /// A proposal contains a new record that is not a pending summons.
    #[error("Proposed record for member {member_id} must be a pending summons, got {actual}")]
    InvalidProposedRecord {
        /// The member of the offending record.
        member_id: MemberId,
        /// Its participation status.
        actual: ParticipationStatus,
    },
    /// Member display name is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// Shift definition is invalid.
    #[error("Invalid shift: {0}")]
    InvalidShift(String),
    /// Unknown shift status string.
    #[error("Invalid shift status: {0}")]
    InvalidShiftStatus(String),
    /// Unknown participation status string.
    #[error("Invalid participation status: {0}")]
    InvalidParticipationStatus(String),
    /// Unknown membership origin string.
    #[error("Invalid membership origin: {0}")]
    InvalidMembershipOrigin(String),
    /// Unknown member category string.
    #[error("Invalid member category: {0}")]
    InvalidMemberCategory(String),
}
