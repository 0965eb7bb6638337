// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use muster_domain::ShiftId;
use time::macros::datetime;

fn create_test_event() -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("7"), String::from("operator")),
        Cause::new(String::from("req-456"), String::from("Weekly rota")),
        Action::new(String::from("ConfirmRotation"), None),
        StateSnapshot::new(String::from("before-state")),
        StateSnapshot::new(String::from("after-state")),
        ShiftId::new(12),
        datetime!(2026-05-01 12:00 UTC),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("7"), String::from("member"));

    assert_eq!(actor.id, "7");
    assert_eq!(actor.actor_type, "member");
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(
        String::from("RespondToSummon"),
        Some(String::from("Member 4 declined")),
    );

    assert_eq!(action.name, "RespondToSummon");
    assert_eq!(action.details, Some(String::from("Member 4 declined")));
}

#[test]
fn test_audit_event_starts_unpersisted() {
    let event: AuditEvent = create_test_event();

    assert_eq!(event.event_id, None);
    assert_eq!(event.shift_id, ShiftId::new(12));
    assert_eq!(event.before.data, "before-state");
    assert_eq!(event.after.data, "after-state");
}

#[test]
fn test_with_event_id_only_changes_id() {
    let event: AuditEvent = create_test_event();
    let stored: AuditEvent = event.clone().with_event_id(41);

    assert_eq!(stored.event_id, Some(41));
    assert_eq!(stored.actor, event.actor);
    assert_eq!(stored.action, event.action);
    assert_eq!(stored.recorded_at, event.recorded_at);
}

#[test]
fn test_audit_event_equality() {
    assert_eq!(create_test_event(), create_test_event());
    assert_ne!(create_test_event(), create_test_event().with_event_id(1));
}
