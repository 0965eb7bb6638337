// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    NOW, apply_and_store, create_test_actor, create_test_cause, create_test_member,
    create_test_shift,
};
use crate::{Persistence, PersistenceError};
use muster::{Command, MemberStatsUpdate, ShiftState, TransitionResult, apply};
use muster_domain::{Member, MemberId, ParticipationStatus, ShiftMembership, ShiftStatus};

fn summon_all(members: &[&Member]) -> Command {
    Command::ConfirmRotation {
        members: members
            .iter()
            .map(|m| ShiftMembership::summoned(m, NOW))
            .collect(),
    }
}

fn respond(member: &Member, accept: bool) -> Command {
    Command::RespondToSummon {
        member_id: member.id,
        accept,
    }
}

#[test]
fn test_confirmed_rotation_is_stored_with_new_version() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let bob = create_test_member(&mut persistence, "Bob");
    let state = create_test_shift(&mut persistence, 2);

    let stored = apply_and_store(&mut persistence, &state, summon_all(&[&alice, &bob]));

    assert_eq!(stored.version, 1);
    assert_eq!(stored.shift.status, ShiftStatus::AwaitingConfirmation);
    let names: Vec<&str> = stored
        .shift
        .members
        .iter()
        .map(|m| m.member_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert!(
        stored
            .shift
            .members
            .iter()
            .all(|m| m.participation_status == ParticipationStatus::Pending)
    );
}

#[test]
fn test_membership_details_survive_storage() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let state = create_test_shift(&mut persistence, 2);
    let state = apply_and_store(&mut persistence, &state, summon_all(&[&alice]));

    let stored = apply_and_store(&mut persistence, &state, respond(&alice, true));

    let record = stored.shift.membership(alice.id).unwrap();
    assert_eq!(record.participation_status, ParticipationStatus::Confirmed);
    assert_eq!(record.joined_at, NOW);
    assert_eq!(record.confirmed_at, Some(NOW));
}

#[test]
fn test_stale_write_is_refused() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let bob = create_test_member(&mut persistence, "Bob");
    let state = create_test_shift(&mut persistence, 2);

    let first: TransitionResult = apply(
        &state,
        Command::Volunteer {
            member_id: alice.id,
            member_name: alice.display_name.clone(),
            avatar: None,
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
    .unwrap();
    let second: TransitionResult = apply(
        &state,
        Command::Volunteer {
            member_id: bob.id,
            member_name: bob.display_name.clone(),
            avatar: None,
        },
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    persistence.persist_transition(&first).unwrap();
    let err = persistence.persist_transition(&second).unwrap_err();

    assert_eq!(
        err,
        PersistenceError::ConcurrentModification {
            shift_id: state.shift.id,
            expected_version: 0,
        }
    );
    let stored = persistence.fetch_shift(state.shift.id).unwrap();
    assert!(stored.shift.has_member(alice.id));
    assert!(!stored.shift.has_member(bob.id));
    assert_eq!(
        persistence
            .get_audit_timeline(state.shift.id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_finalize_credits_confirmed_members_only() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let bob = create_test_member(&mut persistence, "Bob");
    let state = create_test_shift(&mut persistence, 2);
    let state = apply_and_store(&mut persistence, &state, summon_all(&[&alice, &bob]));
    let state = apply_and_store(&mut persistence, &state, respond(&alice, true));
    let state = apply_and_store(&mut persistence, &state, respond(&bob, false));

    let stored = apply_and_store(&mut persistence, &state, Command::Finalize);

    assert_eq!(stored.shift.status, ShiftStatus::Finished);
    let alice = persistence.fetch_member(alice.id).unwrap();
    let bob = persistence.fetch_member(bob.id).unwrap();
    assert_eq!(alice.shifts_count, 1);
    assert_eq!(alice.last_shift_date, Some(NOW));
    assert_eq!(bob.shifts_count, 0);
    assert!(bob.last_shift_date.is_none());
}

#[test]
fn test_retried_finalize_never_double_counts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let state = create_test_shift(&mut persistence, 1);
    let state = apply_and_store(&mut persistence, &state, summon_all(&[&alice]));
    let state: ShiftState = apply_and_store(&mut persistence, &state, respond(&alice, true));

    // Two finalizations computed from the same read.
    let finalize = || {
        apply(
            &state,
            Command::Finalize,
            create_test_actor(),
            create_test_cause(),
            NOW,
        )
        .unwrap()
    };
    let first = finalize();
    let retry = finalize();

    persistence.persist_transition(&first).unwrap();
    let err = persistence.persist_transition(&retry).unwrap_err();

    assert_eq!(err, PersistenceError::AlreadyFinished(state.shift.id));
    assert_eq!(persistence.fetch_member(alice.id).unwrap().shifts_count, 1);
}

#[test]
fn test_failed_write_rolls_everything_back() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let state = create_test_shift(&mut persistence, 1);
    let state = apply_and_store(&mut persistence, &state, summon_all(&[&alice]));
    let state = apply_and_store(&mut persistence, &state, respond(&alice, true));

    let mut result = apply(
        &state,
        Command::Finalize,
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
    .unwrap();
    result.stats_updates.push(MemberStatsUpdate {
        member_id: MemberId::new(999),
        finalized_at: NOW,
    });

    let err = persistence.persist_transition(&result).unwrap_err();

    assert_eq!(err, PersistenceError::MemberNotFound(MemberId::new(999)));
    let stored = persistence.fetch_shift(state.shift.id).unwrap();
    assert_eq!(stored.shift.status, ShiftStatus::Confirmed);
    assert_eq!(stored.version, state.version);
    assert_eq!(persistence.fetch_member(alice.id).unwrap().shifts_count, 0);
    assert_eq!(
        persistence
            .get_audit_timeline(state.shift.id)
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_audit_timeline_lists_each_transition_in_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let state = create_test_shift(&mut persistence, 1);
    let state = apply_and_store(&mut persistence, &state, summon_all(&[&alice]));
    let state = apply_and_store(&mut persistence, &state, respond(&alice, true));
    apply_and_store(&mut persistence, &state, Command::Finalize);

    let timeline = persistence.get_audit_timeline(state.shift.id).unwrap();

    let actions: Vec<&str> = timeline.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(actions, vec!["ConfirmRotation", "RespondToSummon", "Finalize"]);
    assert!(timeline.iter().all(|e| e.event_id.is_some()));
    assert!(timeline.iter().all(|e| e.shift_id == state.shift.id));
    assert_eq!(timeline[0].actor.id, "operator-1");
    assert_eq!(timeline[0].recorded_at, NOW);
}

#[test]
fn test_audit_event_is_retrievable_by_id() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let alice = create_test_member(&mut persistence, "Alice");
    let state = create_test_shift(&mut persistence, 1);
    let result = apply(
        &state,
        summon_all(&[&alice]),
        create_test_actor(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let stored = persistence.persist_transition(&result).unwrap();
    let event = persistence.get_audit_event(stored.event_id).unwrap();

    assert_eq!(event.event_id, Some(stored.event_id));
    assert_eq!(event.before, result.audit_event.before);
    assert_eq!(event.after, result.audit_event.after);
    assert_eq!(event.cause.description, "Test operation");
    assert_eq!(
        persistence.get_audit_event(stored.event_id + 1).unwrap_err(),
        PersistenceError::EventNotFound(stored.event_id + 1)
    );
}
