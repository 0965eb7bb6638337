// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler checks the caller's authority, loads what it needs from
//! persistence, runs the pure core and stores the result. Shift transitions
//! are read, applied and written by [`commit`]; the caller is responsible for
//! serializing calls on the same shift.

use muster::{
    Command, ShiftEvent, ShiftState, TransitionResult, apply, preview_rotation as core_preview,
};
use muster_audit::{AuditEvent, Cause};
use muster_domain::{
    Member, MemberCategory, MemberId, RotationProposal, Shift, ShiftId, ShiftMembership,
    validate_member_can_serve, validate_member_name, validate_shift_fields,
};
use muster_persistence::{NewMember, NewShift, Persistence, PersistTransitionResult};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventInfo, ConfirmRotationRequest, CreateMemberRequest, CreateShiftRequest, MemberInfo,
    MemberRequest, MembershipInfo, NoticeInfo, RespondToSummonRequest, RotationPreviewResponse,
    ShiftInfo, ShortfallInfo, TransitionResponse,
};

/// Result of an API operation that changed a shift.
///
/// Successful shift operations always produce an audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation, with its stored ID.
    pub audit_event: AuditEvent,
    /// Events to publish to live subscribers.
    pub events: Vec<ShiftEvent>,
}

// ============================================================================
// Member Directory
// ============================================================================

/// Adds a member to the directory.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The name is empty or the category unknown
/// - The database write fails
pub fn create_member(
    persistence: &mut Persistence,
    request: &CreateMemberRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MemberInfo, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "create_member")?;

    validate_member_name(&request.display_name).map_err(translate_domain_error)?;
    let category: MemberCategory = match request.category.as_deref() {
        None => MemberCategory::Operational,
        Some(raw) => raw.parse().map_err(translate_domain_error)?,
    };

    let member: Member = persistence
        .create_member(&NewMember {
            display_name: request.display_name.trim().to_string(),
            avatar: request.avatar.clone(),
            category,
            is_operator: request.operator,
        })
        .map_err(translate_persistence_error)?;

    Ok(MemberInfo::from(&member))
}

/// Marks a member inactive. Inactive members are never summoned.
///
/// # Errors
///
/// Returns an error if the actor is not an operator or the member does not
/// exist.
pub fn deactivate_member(
    persistence: &mut Persistence,
    member_id: MemberId,
    authenticated_actor: &AuthenticatedActor,
) -> Result<MemberInfo, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "deactivate_member")?;

    let member: Member = persistence
        .deactivate_member(member_id)
        .map_err(translate_persistence_error)?;

    Ok(MemberInfo::from(&member))
}

/// Lists the member directory.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_members(persistence: &mut Persistence) -> Result<Vec<MemberInfo>, ApiError> {
    let members: Vec<Member> = persistence
        .list_members()
        .map_err(translate_persistence_error)?;
    Ok(members.iter().map(MemberInfo::from).collect())
}

// ============================================================================
// Shifts
// ============================================================================

/// Creates an open shift with no members.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The title is empty, there are no vacancies, or the shift does not end
///   after it starts
/// - The database write fails
pub fn create_shift(
    persistence: &mut Persistence,
    request: &CreateShiftRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ShiftInfo, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "create_shift")?;

    // Not stored yet, so there is no real ID to validate against
    let draft: Shift = Shift::new(
        ShiftId::new(0),
        &request.title,
        &request.location,
        request.starts_at,
        request.ends_at,
        request.vacancies,
    );
    validate_shift_fields(&draft).map_err(translate_domain_error)?;

    let state: ShiftState = persistence
        .create_shift(&NewShift {
            title: draft.title.trim().to_string(),
            location: draft.location,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            vacancies: draft.vacancies,
        })
        .map_err(translate_persistence_error)?;

    Ok(ShiftInfo::new(&state.shift, state.version))
}

/// Retrieves a shift with its membership list.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift does not exist.
pub fn get_shift(persistence: &mut Persistence, shift_id: ShiftId) -> Result<ShiftInfo, ApiError> {
    let state: ShiftState = persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;
    Ok(ShiftInfo::new(&state.shift, state.version))
}

/// Lists every shift by start time.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shifts(persistence: &mut Persistence) -> Result<Vec<ShiftInfo>, ApiError> {
    let states: Vec<ShiftState> = persistence
        .list_shifts()
        .map_err(translate_persistence_error)?;
    Ok(states
        .iter()
        .map(|state| ShiftInfo::new(&state.shift, state.version))
        .collect())
}

// ============================================================================
// Rotation
// ============================================================================

/// Proposes members for the open vacancies of a shift without storing
/// anything.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The shift does not exist or is no longer open
pub fn preview_rotation(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    authenticated_actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<RotationPreviewResponse, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "preview_rotation")?;

    let state: ShiftState = persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;
    let directory: Vec<Member> = persistence
        .fetch_active_members()
        .map_err(translate_persistence_error)?;
    let previous_shift: Option<Shift> = persistence
        .fetch_most_recent_prior_shift(&state.shift)
        .map_err(translate_persistence_error)?;

    let proposal: RotationProposal =
        core_preview(&state, &directory, previous_shift.as_ref(), now)
            .map_err(translate_core_error)?;

    info!(
        shift_id = %shift_id,
        selected = proposal.newly_selected.len(),
        from_low_priority = proposal.from_low_priority,
        short = proposal.shortfall.is_some(),
        "Computed rotation preview"
    );

    Ok(RotationPreviewResponse {
        shift_id,
        members: proposal.members.iter().map(MembershipInfo::from).collect(),
        newly_selected: proposal.newly_selected,
        from_low_priority: proposal.from_low_priority,
        previous_shift_id: previous_shift.map(|shift| shift.id),
        shortfall: proposal.shortfall.map(ShortfallInfo::from),
    })
}

/// Stores a rotation and starts waiting for the summoned members to answer.
///
/// Members already in the shift keep their record. Everyone else is looked up
/// in the directory and summoned.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The shift or a listed member does not exist
/// - A listed member is inactive or an applicant
/// - The list repeats a member or overfills the shift
/// - The shift is not open
pub fn confirm_rotation(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    request: &ConfirmRotationRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "confirm_rotation")?;

    let state: ShiftState = persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;

    let mut members: Vec<ShiftMembership> = Vec::with_capacity(request.member_ids.len());
    for member_id in &request.member_ids {
        if let Some(existing) = state.shift.membership(*member_id) {
            members.push(existing.clone());
            continue;
        }
        let member: Member = persistence
            .fetch_member(*member_id)
            .map_err(translate_persistence_error)?;
        validate_member_can_serve(&member).map_err(translate_domain_error)?;
        members.push(ShiftMembership::summoned(&member, now));
    }

    commit(
        persistence,
        &state,
        Command::ConfirmRotation { members },
        authenticated_actor,
        cause,
        now,
        "Rotation confirmed",
    )
}

// ============================================================================
// Membership
// ============================================================================

/// Records a member's offer to take a shift.
///
/// Members may only volunteer themselves.
///
/// # Errors
///
/// Returns an error if:
/// - A member volunteers someone else
/// - The member is unknown, inactive or an applicant
/// - The member already holds a record in the shift
/// - The shift is finished
pub fn volunteer(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    request: &MemberRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_self_or_operator(
        authenticated_actor,
        request.member_id,
        "volunteer",
    )?;

    let member: Member = persistence
        .fetch_member(request.member_id)
        .map_err(translate_persistence_error)?;
    validate_member_can_serve(&member).map_err(translate_domain_error)?;

    let state: ShiftState = persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;

    commit(
        persistence,
        &state,
        Command::Volunteer {
            member_id: member.id,
            member_name: member.display_name,
            avatar: member.avatar,
        },
        authenticated_actor,
        cause,
        now,
        "Volunteer request recorded",
    )
}

/// Summons a member directly, outside rotation.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an operator
/// - The member is unknown, inactive or an applicant
/// - The member already holds a record, or the shift is full
/// - The shift is finished
pub fn assign_member(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    request: &MemberRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "assign_member")?;

    let member: Member = persistence
        .fetch_member(request.member_id)
        .map_err(translate_persistence_error)?;
    let state: ShiftState = persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;

    commit(
        persistence,
        &state,
        Command::AssignMember { member },
        authenticated_actor,
        cause,
        now,
        "Member summoned",
    )
}

/// Accepts a pending volunteer.
///
/// # Errors
///
/// Returns an error if the actor is not an operator, the member has no record,
/// or the record is not a pending volunteer request.
pub fn approve_volunteer(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    member_id: MemberId,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "approve_volunteer")?;
    load_and_commit(
        persistence,
        shift_id,
        Command::ApproveVolunteer { member_id },
        authenticated_actor,
        cause,
        now,
        "Volunteer approved",
    )
}

/// Turns a pending volunteer away and removes the record.
///
/// # Errors
///
/// Returns an error if the actor is not an operator, the member has no record,
/// or the record is not a pending volunteer request.
pub fn reject_volunteer(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    member_id: MemberId,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "reject_volunteer")?;
    load_and_commit(
        persistence,
        shift_id,
        Command::RejectVolunteer { member_id },
        authenticated_actor,
        cause,
        now,
        "Volunteer rejected",
    )
}

/// Records a summoned member's answer.
///
/// Members may only answer their own summons.
///
/// # Errors
///
/// Returns an error if:
/// - A member answers for someone else
/// - The member was never summoned to the shift
/// - The summons was already answered
/// - The shift is finished
pub fn respond_to_summon(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    member_id: MemberId,
    request: &RespondToSummonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_self_or_operator(
        authenticated_actor,
        member_id,
        "respond_to_summon",
    )?;
    let message: &str = if request.accept {
        "Summons accepted"
    } else {
        "Summons declined"
    };
    load_and_commit(
        persistence,
        shift_id,
        Command::RespondToSummon {
            member_id,
            accept: request.accept,
        },
        authenticated_actor,
        cause,
        now,
        message,
    )
}

/// Closes a shift and credits every confirmed member.
///
/// # Errors
///
/// Returns an error if the actor is not an operator, the shift does not
/// exist, or it is already finished.
pub fn finalize_shift(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "finalize_shift")?;
    load_and_commit(
        persistence,
        shift_id,
        Command::Finalize,
        authenticated_actor,
        cause,
        now,
        "Shift finalized",
    )
}

// ============================================================================
// Audit
// ============================================================================

/// Retrieves the audit timeline of a shift, oldest first.
///
/// # Errors
///
/// Returns an error if the actor is not an operator or the shift does not
/// exist.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    AuthorizationService::authorize_operator(authenticated_actor, "get_audit_timeline")?;

    persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;
    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(shift_id)
        .map_err(translate_persistence_error)?;
    Ok(events.iter().map(AuditEventInfo::from).collect())
}

fn load_and_commit(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
    message: &str,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    let state: ShiftState = persistence
        .fetch_shift(shift_id)
        .map_err(translate_persistence_error)?;
    commit(
        persistence,
        &state,
        command,
        authenticated_actor,
        cause,
        now,
        message,
    )
}

/// Applies a command to a loaded shift and stores the result.
fn commit(
    persistence: &mut Persistence,
    state: &ShiftState,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
    message: &str,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    let action: &'static str = command.name();
    let result: TransitionResult = apply(
        state,
        command,
        authenticated_actor.to_audit_actor(),
        cause,
        now,
    )
    .map_err(translate_core_error)?;

    let stored: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        shift_id = %result.new_state.shift.id,
        action,
        event_id = stored.event_id,
        version = stored.version,
        status = %result.new_state.shift.status,
        "Applied shift transition"
    );

    let TransitionResult {
        new_state,
        audit_event,
        events,
        notices,
        ..
    } = result;

    Ok(ApiResult {
        response: TransitionResponse {
            shift: ShiftInfo::new(&new_state.shift, stored.version),
            event_id: stored.event_id,
            notices: notices.iter().map(NoticeInfo::from).collect(),
            message: message.to_string(),
        },
        audit_event: audit_event.with_event_id(stored.event_id),
        events,
    })
}
