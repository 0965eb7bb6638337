// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests walking shifts through their whole lifecycle.

use super::helpers::{
    LATER, NOW, awaiting_shift, create_test_actor, create_test_cause, member, open_shift,
    respond, run, run_at,
};
use crate::{Command, CoreError, MemberStatsUpdate, ShiftEvent, apply};
use muster_domain::{DomainError, MemberId, ParticipationStatus, ShiftStatus};

#[test]
fn test_accepting_summons_sets_confirmed_at() {
    let state = awaiting_shift(2, &[member(1, "Alice"), member(2, "Bob")]);

    let transition = run_at(&state, respond(1, true), LATER);

    let record = transition
        .new_state
        .shift
        .membership(MemberId::new(1))
        .unwrap();
    assert_eq!(record.participation_status, ParticipationStatus::Confirmed);
    assert_eq!(record.confirmed_at, Some(LATER));
    assert_eq!(
        transition.new_state.shift.status,
        ShiftStatus::AwaitingConfirmation
    );
}

#[test]
fn test_declining_then_responding_again_is_rejected() {
    let state = awaiting_shift(2, &[member(1, "Alice"), member(2, "Bob")]);
    let state = run(&state, respond(1, false)).new_state;
    assert_eq!(
        state
            .shift
            .membership(MemberId::new(1))
            .unwrap()
            .participation_status,
        ParticipationStatus::Declined
    );

    let result = apply(
        &state,
        respond(1, true),
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidParticipationState {
            shift_id: state.shift.id,
            member_id: MemberId::new(1),
            action: "accept",
            expected: ParticipationStatus::Pending,
            actual: ParticipationStatus::Declined,
        })
    );
}

#[test]
fn test_responding_without_summons_fails_with_not_summoned() {
    let state = awaiting_shift(2, &[member(1, "Alice")]);

    let result = apply(
        &state,
        respond(8, true),
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NotSummoned {
            shift_id: state.shift.id,
            member_id: MemberId::new(8),
        })
    );
}

#[test]
fn test_volunteer_cannot_answer_a_summons() {
    let state = open_shift(2);
    let state = run(
        &state,
        Command::Volunteer {
            member_id: MemberId::new(5),
            member_name: String::from("Eve"),
            avatar: None,
        },
    )
    .new_state;

    let result = apply(
        &state,
        respond(5, true),
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidParticipationState {
                actual: ParticipationStatus::VolunteerPending,
                ..
            }
        ))
    ));
}

#[test]
fn test_shift_confirms_itself_once_everyone_answered() {
    let state = awaiting_shift(2, &[member(1, "Alice"), member(2, "Bob")]);
    let state = run(&state, respond(1, true)).new_state;

    let transition = run(&state, respond(2, false));

    assert_eq!(transition.new_state.shift.status, ShiftStatus::Confirmed);
    assert_eq!(
        transition.events.last(),
        Some(&ShiftEvent::StatusChanged {
            shift_id: state.shift.id,
            from: ShiftStatus::AwaitingConfirmation,
            to: ShiftStatus::Confirmed,
        })
    );
}

#[test]
fn test_pending_volunteer_holds_confirmation_back() {
    let state = open_shift(3);
    let state = run(
        &state,
        Command::Volunteer {
            member_id: MemberId::new(5),
            member_name: String::from("Eve"),
            avatar: None,
        },
    )
    .new_state;
    let state = run(
        &state,
        Command::ConfirmRotation {
            members: vec![muster_domain::ShiftMembership::summoned(
                &member(1, "Alice"),
                NOW,
            )],
        },
    )
    .new_state;
    let state = run(&state, respond(1, true)).new_state;
    assert_eq!(state.shift.status, ShiftStatus::AwaitingConfirmation);

    let transition = run(
        &state,
        Command::ApproveVolunteer {
            member_id: MemberId::new(5),
        },
    );

    assert_eq!(transition.new_state.shift.status, ShiftStatus::Confirmed);
}

#[test]
fn test_finalize_credits_only_confirmed_members() {
    let state = awaiting_shift(
        3,
        &[member(1, "Alice"), member(2, "Bob"), member(3, "Carol")],
    );
    let state = run(&state, respond(1, true)).new_state;
    let state = run(&state, respond(2, false)).new_state;

    let transition = run_at(&state, Command::Finalize, LATER);

    assert_eq!(transition.new_state.shift.status, ShiftStatus::Finished);
    assert_eq!(
        transition.stats_updates,
        vec![MemberStatsUpdate {
            member_id: MemberId::new(1),
            finalized_at: LATER,
        }]
    );
    assert!(transition.events.contains(&ShiftEvent::ShiftFinalized {
        shift_id: state.shift.id,
        confirmed: vec![MemberId::new(1)],
    }));
}

#[test]
fn test_finalize_twice_fails_with_already_finished() {
    let state = awaiting_shift(1, &[member(1, "Alice")]);
    let state = run(&state, respond(1, true)).new_state;
    let state = run(&state, Command::Finalize).new_state;

    let result = apply(
        &state,
        Command::Finalize,
        create_test_actor(),
        create_test_cause(),
        NOW,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::AlreadyFinished(state.shift.id))
    );
}

#[test]
fn test_finalize_allowed_before_everyone_answered() {
    let state = awaiting_shift(2, &[member(1, "Alice"), member(2, "Bob")]);
    let state = run(&state, respond(2, true)).new_state;

    let transition = run(&state, Command::Finalize);

    assert_eq!(transition.new_state.shift.status, ShiftStatus::Finished);
    assert_eq!(transition.stats_updates.len(), 1);
    assert_eq!(transition.stats_updates[0].member_id, MemberId::new(2));
}

#[test]
fn test_finished_shift_rejects_every_change() {
    let state = awaiting_shift(2, &[member(1, "Alice"), member(2, "Bob")]);
    let state = run(&state, Command::Finalize).new_state;

    let commands = vec![
        Command::Volunteer {
            member_id: MemberId::new(5),
            member_name: String::from("Eve"),
            avatar: None,
        },
        Command::AssignMember {
            member: member(6, "Finn"),
        },
        Command::ApproveVolunteer {
            member_id: MemberId::new(1),
        },
        Command::RejectVolunteer {
            member_id: MemberId::new(1),
        },
        respond(1, true),
        Command::ConfirmRotation { members: vec![] },
    ];

    for command in commands {
        let result = apply(
            &state,
            command,
            create_test_actor(),
            create_test_cause(),
            NOW,
        );
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::InvalidStateTransition {
                    status: ShiftStatus::Finished,
                    ..
                }
            ))
        ));
    }
}

#[test]
fn test_full_rotation_flow() {
    let state = open_shift(2);
    let directory = vec![member(1, "Alice"), member(2, "Bob"), member(3, "Carol")];
    let proposal = crate::preview_rotation(&state, &directory, None, NOW).unwrap();
    let summoned: Vec<MemberId> = proposal.newly_selected.clone();

    let state = run(
        &state,
        Command::ConfirmRotation {
            members: proposal.members,
        },
    )
    .new_state;
    let state = run(&state, respond(summoned[0].value(), true)).new_state;
    let state = run(&state, respond(summoned[1].value(), true)).new_state;
    assert_eq!(state.shift.status, ShiftStatus::Confirmed);

    let transition = run(&state, Command::Finalize);

    assert_eq!(transition.stats_updates.len(), 2);
    assert_eq!(transition.new_state.shift.status, ShiftStatus::Finished);
}
