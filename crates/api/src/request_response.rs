// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use muster::TransitionNotice;
use muster_audit::AuditEvent;
use muster_domain::{
    InsufficientCandidates, Member, MemberId, Shift, ShiftId, ShiftMembership,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to create a member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateMemberRequest {
    /// Name shown in rotas.
    pub display_name: String,
    /// Optional avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// `Operational` (default) or `Applicant`.
    #[serde(default)]
    pub category: Option<String>,
    /// Grants operator authority.
    #[serde(default)]
    pub operator: bool,
}

/// A member as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub member_id: MemberId,
    pub display_name: String,
    pub avatar: Option<String>,
    pub category: String,
    pub active: bool,
    pub operator: bool,
    pub shifts_count: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_shift_date: Option<OffsetDateTime>,
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id,
            display_name: member.display_name.clone(),
            avatar: member.avatar.clone(),
            category: member.category.as_str().to_string(),
            active: member.active,
            operator: member.is_operator,
            shifts_count: member.shifts_count,
            last_shift_date: member.last_shift_date,
        }
    }
}

/// API request to create a shift.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateShiftRequest {
    pub title: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    pub vacancies: u32,
}

/// One membership record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipInfo {
    pub member_id: MemberId,
    pub member_name: String,
    pub avatar: Option<String>,
    pub origin: String,
    pub participation_status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub confirmed_at: Option<OffsetDateTime>,
}

impl From<&ShiftMembership> for MembershipInfo {
    fn from(record: &ShiftMembership) -> Self {
        Self {
            member_id: record.member_id,
            member_name: record.member_name.clone(),
            avatar: record.avatar.clone(),
            origin: record.origin.as_str().to_string(),
            participation_status: record.participation_status.as_str().to_string(),
            joined_at: record.joined_at,
            confirmed_at: record.confirmed_at,
        }
    }
}

/// A shift as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInfo {
    pub shift_id: ShiftId,
    pub title: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    pub vacancies: u32,
    pub status: String,
    /// Number of records that are not declined.
    pub participating: usize,
    pub version: i64,
    pub members: Vec<MembershipInfo>,
}

impl ShiftInfo {
    /// Builds the response view of a shift at a stored version.
    #[must_use]
    pub fn new(shift: &Shift, version: i64) -> Self {
        Self {
            shift_id: shift.id,
            title: shift.title.clone(),
            location: shift.location.clone(),
            starts_at: shift.starts_at,
            ends_at: shift.ends_at,
            vacancies: shift.vacancies,
            status: shift.status.as_str().to_string(),
            participating: shift.participating_count(),
            version,
            members: shift.members.iter().map(MembershipInfo::from).collect(),
        }
    }
}

/// Vacancies rotation could not fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallInfo {
    pub needed: usize,
    pub available: usize,
}

impl From<InsufficientCandidates> for ShortfallInfo {
    fn from(shortfall: InsufficientCandidates) -> Self {
        Self {
            needed: shortfall.needed,
            available: shortfall.available,
        }
    }
}

/// API response for a rotation preview. Nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPreviewResponse {
    pub shift_id: ShiftId,
    /// Current participants followed by the proposed summonses.
    pub members: Vec<MembershipInfo>,
    /// Members this run would summon, in selection order.
    pub newly_selected: Vec<MemberId>,
    /// How many picks came from the people who worked the previous shift.
    pub from_low_priority: usize,
    /// The shift used to de-prioritize candidates, if any.
    pub previous_shift_id: Option<ShiftId>,
    /// Set when not every vacancy could be filled.
    pub shortfall: Option<ShortfallInfo>,
}

/// API request to confirm a rotation.
///
/// Lists every member the operator wants on the shift. Members already in the
/// shift keep their record; the rest are summoned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmRotationRequest {
    pub member_ids: Vec<MemberId>,
}

/// API request naming a member: used to volunteer and to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemberRequest {
    pub member_id: MemberId,
}

/// API request answering a summons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RespondToSummonRequest {
    pub accept: bool,
}

/// Non-fatal condition attached to a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeInfo {
    pub kind: String,
    pub message: String,
}

impl From<&TransitionNotice> for NoticeInfo {
    fn from(notice: &TransitionNotice) -> Self {
        match notice {
            TransitionNotice::Understaffed {
                vacancies,
                participating,
            } => Self {
                kind: String::from("UNDERSTAFFED"),
                message: format!("Only {participating} of {vacancies} places are taken"),
            },
        }
    }
}

/// API response for any successful shift transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    /// The shift as stored after the transition.
    pub shift: ShiftInfo,
    /// ID of the audit event recording the transition.
    pub event_id: i64,
    pub notices: Vec<NoticeInfo>,
    pub message: String,
}

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub shift_id: ShiftId,
    pub action: String,
    pub details: Option<String>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub before: String,
    pub after: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            shift_id: event.shift_id,
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            recorded_at: event.recorded_at,
        }
    }
}
