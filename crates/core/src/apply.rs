// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::event::ShiftEvent;
use crate::state::{MemberStatsUpdate, ShiftState, TransitionNotice, TransitionResult};
use muster_audit::{Action, Actor, AuditEvent, Cause};
use muster_domain::{
    DomainError, Member, MemberId, MembershipOrigin, ParticipationStatus, Shift, ShiftMembership,
    ShiftStatus, validate_member_can_serve, validate_member_name, validate_unique_membership,
};
use time::OffsetDateTime;

/// Side effects collected while a command is applied.
#[derive(Default)]
struct Effects {
    events: Vec<ShiftEvent>,
    stats_updates: Vec<MemberStatsUpdate>,
    notices: Vec<TransitionNotice>,
}

impl Effects {
    fn membership_changed(
        &mut self,
        shift: &Shift,
        member_id: MemberId,
        status: Option<ParticipationStatus>,
    ) {
        self.events.push(ShiftEvent::MembershipChanged {
            shift_id: shift.id,
            member_id,
            status,
        });
    }
}

/// Applies a command to a shift, producing a new state and an audit event.
///
/// The input state is never modified. On error nothing is produced, so a
/// failed command leaves no partial changes behind.
///
/// The returned state keeps the version it was read at; storage bumps it
/// when the transition is written.
///
/// # Arguments
///
/// * `state` - The shift as loaded, with its version
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The instant the transition happens at
///
/// # Errors
///
/// Returns an error if:
/// - The shift's status does not allow the command
/// - The targeted membership record is missing or in the wrong state
/// - The member is already part of the shift
/// - A proposal is malformed or overfills the shift
pub fn apply(
    state: &ShiftState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.name();
    let mut shift: Shift = state.shift.clone();
    let mut effects: Effects = Effects::default();

    let details: String = match command {
        Command::ConfirmRotation { members } => {
            confirm_rotation(&mut shift, members, &mut effects)?
        }
        Command::Volunteer {
            member_id,
            member_name,
            avatar,
        } => volunteer(&mut shift, member_id, &member_name, avatar, now, &mut effects)?,
        Command::AssignMember { member } => assign_member(&mut shift, &member, now, &mut effects)?,
        Command::ApproveVolunteer { member_id } => {
            approve_volunteer(&mut shift, member_id, now, &mut effects)?
        }
        Command::RejectVolunteer { member_id } => {
            reject_volunteer(&mut shift, member_id, &mut effects)?
        }
        Command::RespondToSummon { member_id, accept } => {
            respond_to_summon(&mut shift, member_id, accept, now, &mut effects)?
        }
        Command::Finalize => finalize(&mut shift, now, &mut effects)?,
    };

    settle(&mut shift, &mut effects);

    let new_state: ShiftState = ShiftState::new(shift, state.version);
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(action_name.to_string(), Some(details)),
        state.to_snapshot(),
        new_state.to_snapshot(),
        state.shift.id,
        now,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
        events: effects.events,
        stats_updates: effects.stats_updates,
        notices: effects.notices,
    })
}

const fn ensure_not_finished(shift: &Shift, action: &'static str) -> Result<(), DomainError> {
    if shift.status.is_terminal() {
        return Err(DomainError::InvalidStateTransition {
            shift_id: shift.id,
            status: shift.status,
            action,
        });
    }
    Ok(())
}

const fn ensure_can_move(
    shift: &Shift,
    to: ShiftStatus,
    action: &'static str,
) -> Result<(), DomainError> {
    if !shift.status.can_transition_to(to) {
        return Err(DomainError::InvalidStateTransition {
            shift_id: shift.id,
            status: shift.status,
            action,
        });
    }
    Ok(())
}

fn set_status(shift: &mut Shift, to: ShiftStatus, effects: &mut Effects) {
    let from: ShiftStatus = shift.status;
    shift.status = to;
    effects.events.push(ShiftEvent::StatusChanged {
        shift_id: shift.id,
        from,
        to,
    });
}

/// Moves an awaiting shift to `Confirmed` once nobody is left to answer.
fn settle(shift: &mut Shift, effects: &mut Effects) {
    if shift.status == ShiftStatus::AwaitingConfirmation && !shift.has_unsettled_members() {
        set_status(shift, ShiftStatus::Confirmed, effects);
    }
}

fn confirm_rotation(
    shift: &mut Shift,
    proposed: Vec<ShiftMembership>,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    ensure_can_move(shift, ShiftStatus::AwaitingConfirmation, "confirm rotation for")?;
    validate_unique_membership(shift.id, &proposed)?;

    // Members already in the shift keep the record they have.
    let mut added: Vec<ShiftMembership> = Vec::new();
    for mut record in proposed {
        if shift.has_member(record.member_id) {
            continue;
        }
        if record.participation_status != ParticipationStatus::Pending {
            return Err(DomainError::InvalidProposedRecord {
                member_id: record.member_id,
                actual: record.participation_status,
            });
        }
        record.origin = MembershipOrigin::Rotation;
        added.push(record);
    }

    let participating: usize = shift.participating_count() + added.len();
    let vacancies: usize = shift.vacancies as usize;
    if participating > vacancies {
        return Err(DomainError::VacanciesExceeded {
            shift_id: shift.id,
            vacancies: shift.vacancies,
            requested: participating,
        });
    }

    let summoned: usize = added.len();
    for record in &added {
        effects.membership_changed(shift, record.member_id, Some(record.participation_status));
    }
    shift.members.extend(added);
    set_status(shift, ShiftStatus::AwaitingConfirmation, effects);

    if participating < vacancies {
        effects.notices.push(TransitionNotice::Understaffed {
            vacancies: shift.vacancies,
            participating,
        });
    }

    Ok(format!(
        "Summoned {summoned} members, {participating} of {vacancies} places taken"
    ))
}

fn volunteer(
    shift: &mut Shift,
    member_id: MemberId,
    member_name: &str,
    avatar: Option<String>,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    ensure_not_finished(shift, "volunteer for")?;
    validate_member_name(member_name)?;
    if shift.has_member(member_id) {
        return Err(DomainError::AlreadyAssigned {
            shift_id: shift.id,
            member_id,
        });
    }

    shift.members.push(ShiftMembership::volunteered(
        member_id,
        member_name,
        avatar,
        now,
    ));
    effects.membership_changed(shift, member_id, Some(ParticipationStatus::VolunteerPending));

    Ok(format!("Member {member_id} volunteered"))
}

fn assign_member(
    shift: &mut Shift,
    member: &Member,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    ensure_not_finished(shift, "assign members to")?;
    validate_member_can_serve(member)?;
    if shift.has_member(member.id) {
        return Err(DomainError::AlreadyAssigned {
            shift_id: shift.id,
            member_id: member.id,
        });
    }
    let requested: usize = shift.participating_count() + 1;
    if requested > shift.vacancies as usize {
        return Err(DomainError::VacanciesExceeded {
            shift_id: shift.id,
            vacancies: shift.vacancies,
            requested,
        });
    }

    shift.members.push(ShiftMembership::summoned(member, now));
    effects.membership_changed(shift, member.id, Some(ParticipationStatus::Pending));

    Ok(format!("Member {} summoned by an operator", member.id))
}

fn volunteer_record(
    shift: &Shift,
    member_id: MemberId,
    action: &'static str,
) -> Result<(), DomainError> {
    ensure_not_finished(shift, action)?;
    let record: &ShiftMembership =
        shift
            .membership(member_id)
            .ok_or(DomainError::MembershipNotFound {
                shift_id: shift.id,
                member_id,
            })?;
    if record.participation_status != ParticipationStatus::VolunteerPending {
        return Err(DomainError::InvalidParticipationState {
            shift_id: shift.id,
            member_id,
            action,
            expected: ParticipationStatus::VolunteerPending,
            actual: record.participation_status,
        });
    }
    Ok(())
}

fn approve_volunteer(
    shift: &mut Shift,
    member_id: MemberId,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    volunteer_record(shift, member_id, "approve")?;
    if let Some(record) = shift.membership_mut(member_id) {
        record.confirm(now);
    }
    effects.membership_changed(shift, member_id, Some(ParticipationStatus::Confirmed));
    Ok(format!("Volunteer {member_id} approved"))
}

fn reject_volunteer(
    shift: &mut Shift,
    member_id: MemberId,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    volunteer_record(shift, member_id, "reject")?;
    shift.members.retain(|m| m.member_id != member_id);
    effects.membership_changed(shift, member_id, None);
    Ok(format!("Volunteer {member_id} rejected"))
}

fn respond_to_summon(
    shift: &mut Shift,
    member_id: MemberId,
    accept: bool,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    let action: &'static str = if accept { "accept" } else { "decline" };
    ensure_not_finished(shift, "respond to")?;
    let shift_id = shift.id;
    let record: &mut ShiftMembership =
        shift
            .membership_mut(member_id)
            .ok_or(DomainError::NotSummoned {
                shift_id,
                member_id,
            })?;
    if record.participation_status != ParticipationStatus::Pending {
        return Err(DomainError::InvalidParticipationState {
            shift_id,
            member_id,
            action,
            expected: ParticipationStatus::Pending,
            actual: record.participation_status,
        });
    }

    if accept {
        record.confirm(now);
    } else {
        record.participation_status = ParticipationStatus::Declined;
    }
    let status: ParticipationStatus = record.participation_status;
    effects.membership_changed(shift, member_id, Some(status));

    Ok(format!("Member {member_id} answered {status}"))
}

fn finalize(
    shift: &mut Shift,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<String, DomainError> {
    if shift.status == ShiftStatus::Finished {
        return Err(DomainError::AlreadyFinished(shift.id));
    }

    let confirmed: Vec<MemberId> = shift.confirmed_member_ids();
    effects.stats_updates = confirmed
        .iter()
        .map(|&member_id| MemberStatsUpdate {
            member_id,
            finalized_at: now,
        })
        .collect();
    set_status(shift, ShiftStatus::Finished, effects);
    effects.events.push(ShiftEvent::ShiftFinalized {
        shift_id: shift.id,
        confirmed: confirmed.clone(),
    });

    Ok(format!("Credited {} confirmed members", confirmed.len()))
}
