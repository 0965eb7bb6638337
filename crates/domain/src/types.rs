// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Canonical identifier of a member in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    /// Wraps a raw directory identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(i64);

impl ShiftId {
    /// Wraps a raw shift identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a member in the association.
///
/// Applicants are still going through admission and are never on duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MemberCategory {
    /// A member who takes part in operational duty.
    #[default]
    Operational,
    /// A non-operational applicant.
    Applicant,
}

impl MemberCategory {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Applicant => "Applicant",
        }
    }

    /// Whether members of this category can be put on a shift.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(self, Self::Operational)
    }
}

impl FromStr for MemberCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Operational" => Ok(Self::Operational),
            "Applicant" => Ok(Self::Applicant),
            _ => Err(DomainError::InvalidMemberCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A read-only snapshot of a member as held by the directory.
///
/// `shifts_count` and `last_shift_date` are the two fairness signals used by
/// rotation. They only change when a shift the member confirmed into is
/// finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Directory identifier.
    pub id: MemberId,
    /// Name shown to operators; also the last rotation tie-breaker.
    pub display_name: String,
    /// Optional avatar reference.
    pub avatar: Option<String>,
    /// Operational member or applicant.
    pub category: MemberCategory,
    /// Inactive members are never eligible.
    pub active: bool,
    /// Whether the member may act as an operator.
    pub is_operator: bool,
    /// Number of finalized shifts this member confirmed into.
    pub shifts_count: u32,
    /// When the most recent finalized shift for this member was closed.
    pub last_shift_date: Option<OffsetDateTime>,
}

impl Member {
    /// Creates an active operational member with no shift history.
    #[must_use]
    pub fn new(id: MemberId, display_name: &str) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            avatar: None,
            category: MemberCategory::Operational,
            active: true,
            is_operator: false,
            shifts_count: 0,
            last_shift_date: None,
        }
    }

    /// Returns a copy granted operator authority.
    #[must_use]
    pub const fn as_operator(mut self) -> Self {
        self.is_operator = true;
        self
    }

    /// Returns a copy with the given shift history.
    #[must_use]
    pub fn with_history(
        mut self,
        shifts_count: u32,
        last_shift_date: Option<OffsetDateTime>,
    ) -> Self {
        self.shifts_count = shifts_count;
        self.last_shift_date = last_shift_date;
        self
    }
}

/// Lifecycle state of a shift.
///
/// Transitions only move forward:
/// `Open -> AwaitingConfirmation -> Confirmed -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    /// Accepting volunteers and rotation proposals.
    #[default]
    Open,
    /// A rotation was confirmed; summoned members are responding.
    AwaitingConfirmation,
    /// Every summons and volunteer request has been settled.
    Confirmed,
    /// Stats committed. The membership list is frozen.
    Finished,
}

impl ShiftStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::AwaitingConfirmation => "AWAITING_CONFIRMATION",
            Self::Confirmed => "CONFIRMED",
            Self::Finished => "FINISHED",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Open` → `AwaitingConfirmation`
    /// - `AwaitingConfirmation` → `Confirmed`
    /// - any non-terminal state → `Finished`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::AwaitingConfirmation)
                | (Self::AwaitingConfirmation, Self::Confirmed)
                | (
                    Self::Open | Self::AwaitingConfirmation | Self::Confirmed,
                    Self::Finished
                )
        )
    }

    /// Returns whether the shift is closed to all further edits.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns whether a shift in this state can serve as the "previous shift"
    /// when partitioning rotation candidates.
    #[must_use]
    pub const fn counts_as_worked(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Finished)
    }
}

impl FromStr for ShiftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "AWAITING_CONFIRMATION" => Ok(Self::AwaitingConfirmation),
            "CONFIRMED" => Ok(Self::Confirmed),
            "FINISHED" => Ok(Self::Finished),
            _ => Err(DomainError::InvalidShiftStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a membership record came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipOrigin {
    /// Selected by rotation or assigned by an operator.
    Rotation,
    /// The member asked to join.
    Volunteer,
}

impl MembershipOrigin {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rotation => "ROTATION",
            Self::Volunteer => "VOLUNTEER",
        }
    }
}

impl FromStr for MembershipOrigin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROTATION" => Ok(Self::Rotation),
            "VOLUNTEER" => Ok(Self::Volunteer),
            _ => Err(DomainError::InvalidMembershipOrigin(s.to_string())),
        }
    }
}

impl std::fmt::Display for MembershipOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-member participation state inside a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    /// Volunteered, waiting for an operator decision.
    VolunteerPending,
    /// Summoned, waiting for the member's answer.
    Pending,
    /// Taking part.
    Confirmed,
    /// Turned the summons down.
    Declined,
}

impl ParticipationStatus {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VolunteerPending => "VOLUNTEER_PENDING",
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Declined => "DECLINED",
        }
    }

    /// Counts toward the shift's capacity (everything except `Declined`).
    #[must_use]
    pub const fn is_participating(&self) -> bool {
        !matches!(self, Self::Declined)
    }

    /// Still waiting on somebody's decision.
    #[must_use]
    pub const fn is_unsettled(&self) -> bool {
        matches!(self, Self::VolunteerPending | Self::Pending)
    }
}

impl FromStr for ParticipationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VOLUNTEER_PENDING" => Ok(Self::VolunteerPending),
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "DECLINED" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidParticipationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member's place in one shift. Owned by the shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftMembership {
    /// The member this record belongs to.
    pub member_id: MemberId,
    /// Display name captured when the record was created.
    pub member_name: String,
    /// Avatar captured when the record was created.
    pub avatar: Option<String>,
    /// Rotation or volunteer.
    pub origin: MembershipOrigin,
    /// Where the member stands.
    pub participation_status: ParticipationStatus,
    /// When the record was created.
    pub joined_at: OffsetDateTime,
    /// When the member was confirmed, if they are.
    pub confirmed_at: Option<OffsetDateTime>,
}

impl ShiftMembership {
    /// A summons created by rotation or operator assignment.
    #[must_use]
    pub fn summoned(member: &Member, now: OffsetDateTime) -> Self {
        Self {
            member_id: member.id,
            member_name: member.display_name.clone(),
            avatar: member.avatar.clone(),
            origin: MembershipOrigin::Rotation,
            participation_status: ParticipationStatus::Pending,
            joined_at: now,
            confirmed_at: None,
        }
    }

    /// A volunteer request awaiting operator approval.
    #[must_use]
    pub fn volunteered(
        member_id: MemberId,
        member_name: &str,
        avatar: Option<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            member_id,
            member_name: member_name.to_string(),
            avatar,
            origin: MembershipOrigin::Volunteer,
            participation_status: ParticipationStatus::VolunteerPending,
            joined_at: now,
            confirmed_at: None,
        }
    }

    /// Marks the record confirmed at `now`.
    pub fn confirm(&mut self, now: OffsetDateTime) {
        self.participation_status = ParticipationStatus::Confirmed;
        self.confirmed_at = Some(now);
    }
}

/// A duty shift and its membership list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    /// Shift identifier.
    pub id: ShiftId,
    /// Short title shown to members.
    pub title: String,
    /// Where the shift takes place.
    pub location: String,
    /// Start of duty. Used to find the previous shift.
    pub starts_at: OffsetDateTime,
    /// End of duty.
    pub ends_at: OffsetDateTime,
    /// Target number of participating members.
    pub vacancies: u32,
    /// Lifecycle state.
    pub status: ShiftStatus,
    /// Membership records, at most one per member.
    pub members: Vec<ShiftMembership>,
}

impl Shift {
    /// Creates an open shift with no members.
    #[must_use]
    pub fn new(
        id: ShiftId,
        title: &str,
        location: &str,
        starts_at: OffsetDateTime,
        ends_at: OffsetDateTime,
        vacancies: u32,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            location: location.to_string(),
            starts_at,
            ends_at,
            vacancies,
            status: ShiftStatus::Open,
            members: Vec::new(),
        }
    }

    /// Looks up the record of a member, whatever its status.
    #[must_use]
    pub fn membership(&self, member_id: MemberId) -> Option<&ShiftMembership> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    /// Mutable lookup of a member's record.
    pub fn membership_mut(&mut self, member_id: MemberId) -> Option<&mut ShiftMembership> {
        self.members.iter_mut().find(|m| m.member_id == member_id)
    }

    /// Whether the member has any record in this shift.
    #[must_use]
    pub fn has_member(&self, member_id: MemberId) -> bool {
        self.membership(member_id).is_some()
    }

    /// Records that are not `Declined`.
    #[must_use]
    pub fn participating(&self) -> Vec<ShiftMembership> {
        self.members
            .iter()
            .filter(|m| m.participation_status.is_participating())
            .cloned()
            .collect()
    }

    /// Number of records that are not `Declined`.
    #[must_use]
    pub fn participating_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.participation_status.is_participating())
            .count()
    }

    /// Members whose record is `Confirmed`.
    #[must_use]
    pub fn confirmed_member_ids(&self) -> Vec<MemberId> {
        self.members
            .iter()
            .filter(|m| m.participation_status == ParticipationStatus::Confirmed)
            .map(|m| m.member_id)
            .collect()
    }

    /// Whether any record is still waiting on a decision.
    #[must_use]
    pub fn has_unsettled_members(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.participation_status.is_unsettled())
    }
}
