// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use muster::ShiftEvent;
use muster_domain::{MemberId, ShiftId};
use time::macros::datetime;

use crate::tests::helpers::{
    NOW, add_member, add_member_with_category, add_shift, answer, as_member, confirm,
    create_test_cause, create_test_operator, create_test_persistence, shift_request, status_of,
};
use crate::{
    ApiError, CreateMemberRequest, MemberRequest, RespondToSummonRequest, approve_volunteer,
    assign_member, create_member, create_shift, finalize_shift, get_audit_timeline, get_shift,
    list_members, list_shifts, reject_volunteer, respond_to_summon, volunteer,
};

fn volunteer_self(
    persistence: &mut muster_persistence::Persistence,
    shift_id: ShiftId,
    member_id: MemberId,
) -> Result<crate::ApiResult<crate::TransitionResponse>, ApiError> {
    volunteer(
        persistence,
        shift_id,
        &MemberRequest { member_id },
        &as_member(member_id),
        create_test_cause(),
        NOW,
    )
}

#[test]
fn test_create_member_defaults_to_operational() {
    let mut persistence = create_test_persistence();

    let info = create_member(
        &mut persistence,
        &CreateMemberRequest {
            display_name: String::from("  Ana  "),
            avatar: Some(String::from("https://img.example/ana.png")),
            category: None,
            operator: false,
        },
        &create_test_operator(),
    )
    .unwrap();

    assert_eq!(info.display_name, "Ana");
    assert_eq!(info.category, "Operational");
    assert!(info.active);
    assert!(!info.operator);
    assert_eq!(info.shifts_count, 0);
    assert_eq!(info.last_shift_date, None);
    assert_eq!(list_members(&mut persistence).unwrap(), vec![info]);
}

#[test]
fn test_create_member_rejects_bad_input() {
    let mut persistence = create_test_persistence();

    let empty = create_member(
        &mut persistence,
        &CreateMemberRequest {
            display_name: String::from("   "),
            avatar: None,
            category: None,
            operator: false,
        },
        &create_test_operator(),
    );
    let unknown_category = create_member(
        &mut persistence,
        &CreateMemberRequest {
            display_name: String::from("Ana"),
            avatar: None,
            category: Some(String::from("Veteran")),
            operator: false,
        },
        &create_test_operator(),
    );

    match empty {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "display_name"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    match unknown_category {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "category"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_create_shift_validates_definition() {
    let mut persistence = create_test_persistence();
    let mut backwards = shift_request(datetime!(2026-05-10 08:00 UTC), 2);
    backwards.ends_at = backwards.starts_at;

    let no_vacancies = create_shift(
        &mut persistence,
        &shift_request(datetime!(2026-05-10 08:00 UTC), 0),
        &create_test_operator(),
    );
    let ends_too_early = create_shift(&mut persistence, &backwards, &create_test_operator());

    assert!(matches!(no_vacancies, Err(ApiError::InvalidInput { .. })));
    assert!(matches!(ends_too_early, Err(ApiError::InvalidInput { .. })));
    assert!(list_shifts(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_unknown_shift_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = get_shift(&mut persistence, ShiftId::new(99));

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_full_shift_lifecycle_credits_confirmed_members() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let bruno = add_member(&mut persistence, "Bruno");
    let shift_id = add_shift(&mut persistence, 2);

    confirm(&mut persistence, shift_id, &[ana, bruno]);
    let first = answer(&mut persistence, shift_id, ana, true);
    assert_eq!(first.response.shift.status, "AWAITING_CONFIRMATION");

    let second = answer(&mut persistence, shift_id, bruno, true);
    assert_eq!(second.response.shift.status, "CONFIRMED");
    assert!(second.events.iter().any(|event| matches!(
        event,
        ShiftEvent::StatusChanged { .. }
    )));

    let finalized = finalize_shift(
        &mut persistence,
        shift_id,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();
    assert_eq!(finalized.response.shift.status, "FINISHED");
    assert!(finalized.events.iter().any(|event| matches!(
        event,
        ShiftEvent::ShiftFinalized { confirmed, .. } if confirmed.len() == 2
    )));

    let members = list_members(&mut persistence).unwrap();
    assert!(members.iter().all(|m| m.shifts_count == 1));
    assert!(members.iter().all(|m| m.last_shift_date == Some(NOW)));
}

#[test]
fn test_declined_member_is_not_credited() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let bruno = add_member(&mut persistence, "Bruno");
    let shift_id = add_shift(&mut persistence, 2);

    confirm(&mut persistence, shift_id, &[ana, bruno]);
    let declined = answer(&mut persistence, shift_id, ana, false);
    assert_eq!(status_of(&declined.response, ana), "DECLINED");
    assert_eq!(declined.response.shift.participating, 1);
    answer(&mut persistence, shift_id, bruno, true);

    finalize_shift(
        &mut persistence,
        shift_id,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let members = list_members(&mut persistence).unwrap();
    let ana_info = members.iter().find(|m| m.member_id == ana).unwrap();
    let bruno_info = members.iter().find(|m| m.member_id == bruno).unwrap();
    assert_eq!(ana_info.shifts_count, 0);
    assert_eq!(bruno_info.shifts_count, 1);
}

#[test]
fn test_summons_can_only_be_answered_once() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let bruno = add_member(&mut persistence, "Bruno");
    let shift_id = add_shift(&mut persistence, 2);
    confirm(&mut persistence, shift_id, &[ana, bruno]);
    answer(&mut persistence, shift_id, ana, false);

    let result = respond_to_summon(
        &mut persistence,
        shift_id,
        ana,
        &RespondToSummonRequest { accept: true },
        &as_member(ana),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidStateTransition { .. })
    ));
}

#[test]
fn test_unsummoned_member_cannot_respond() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let carla = add_member(&mut persistence, "Carla");
    let shift_id = add_shift(&mut persistence, 2);
    confirm(&mut persistence, shift_id, &[ana]);

    let result = respond_to_summon(
        &mut persistence,
        shift_id,
        carla,
        &RespondToSummonRequest { accept: true },
        &as_member(carla),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(result, Err(ApiError::NotSummoned { .. })));
}

#[test]
fn test_volunteer_then_approve() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let shift_id = add_shift(&mut persistence, 2);

    let offered = volunteer_self(&mut persistence, shift_id, ana).unwrap();
    assert_eq!(offered.response.shift.status, "OPEN");
    assert_eq!(status_of(&offered.response, ana), "VOLUNTEER_PENDING");

    let approved = approve_volunteer(
        &mut persistence,
        shift_id,
        ana,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    assert_eq!(status_of(&approved.response, ana), "CONFIRMED");
    let record = approved
        .response
        .shift
        .members
        .iter()
        .find(|m| m.member_id == ana)
        .unwrap();
    assert_eq!(record.origin, "VOLUNTEER");
    assert_eq!(record.confirmed_at, Some(NOW));
}

#[test]
fn test_rejected_volunteer_is_removed() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let shift_id = add_shift(&mut persistence, 2);
    volunteer_self(&mut persistence, shift_id, ana).unwrap();

    let rejected = reject_volunteer(
        &mut persistence,
        shift_id,
        ana,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    assert!(rejected.response.shift.members.is_empty());
    assert!(volunteer_self(&mut persistence, shift_id, ana).is_ok());
}

#[test]
fn test_approving_a_non_volunteer_is_refused() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let bruno = add_member(&mut persistence, "Bruno");
    let shift_id = add_shift(&mut persistence, 2);
    confirm(&mut persistence, shift_id, &[ana]);

    let summoned = approve_volunteer(
        &mut persistence,
        shift_id,
        ana,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    );
    let absent = approve_volunteer(
        &mut persistence,
        shift_id,
        bruno,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(
        summoned,
        Err(ApiError::InvalidStateTransition { .. })
    ));
    assert!(matches!(absent, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_duplicate_volunteer_is_already_assigned() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let shift_id = add_shift(&mut persistence, 2);
    volunteer_self(&mut persistence, shift_id, ana).unwrap();

    let result = volunteer_self(&mut persistence, shift_id, ana);

    assert!(matches!(result, Err(ApiError::AlreadyAssigned { .. })));
}

#[test]
fn test_applicant_cannot_volunteer() {
    let mut persistence = create_test_persistence();
    let abel = add_member_with_category(&mut persistence, "Abel", Some("Applicant"));
    let shift_id = add_shift(&mut persistence, 2);

    let result = volunteer_self(&mut persistence, shift_id, abel);

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "operational_member"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_assign_member_summons_directly() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let bruno = add_member(&mut persistence, "Bruno");
    let shift_id = add_shift(&mut persistence, 1);
    confirm(&mut persistence, shift_id, &[ana]);
    answer(&mut persistence, shift_id, ana, false);

    let assigned = assign_member(
        &mut persistence,
        shift_id,
        &MemberRequest { member_id: bruno },
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    assert_eq!(status_of(&assigned.response, bruno), "PENDING");
    assert_eq!(assigned.response.shift.participating, 1);

    let repeat = assign_member(
        &mut persistence,
        shift_id,
        &MemberRequest { member_id: ana },
        &create_test_operator(),
        create_test_cause(),
        NOW,
    );
    assert!(matches!(repeat, Err(ApiError::AlreadyAssigned { .. })));
}

#[test]
fn test_finished_shift_refuses_everything() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let shift_id = add_shift(&mut persistence, 1);
    finalize_shift(
        &mut persistence,
        shift_id,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let again = finalize_shift(
        &mut persistence,
        shift_id,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    );
    let late_volunteer = volunteer_self(&mut persistence, shift_id, ana);

    assert!(matches!(again, Err(ApiError::AlreadyFinished { .. })));
    assert!(matches!(
        late_volunteer,
        Err(ApiError::InvalidStateTransition { .. })
    ));
}

#[test]
fn test_audit_timeline_records_every_transition() {
    let mut persistence = create_test_persistence();
    let ana = add_member(&mut persistence, "Ana");
    let shift_id = add_shift(&mut persistence, 1);
    confirm(&mut persistence, shift_id, &[ana]);
    answer(&mut persistence, shift_id, ana, true);
    finalize_shift(
        &mut persistence,
        shift_id,
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let timeline = get_audit_timeline(&mut persistence, shift_id, &create_test_operator()).unwrap();

    let actions: Vec<&str> = timeline.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["ConfirmRotation", "RespondToSummon", "Finalize"]
    );
    assert_eq!(timeline[1].actor_id, ana.to_string());
    assert_eq!(timeline[1].actor_type, "member");
    assert_eq!(timeline[0].cause_id, "api-req-456");
    assert!(timeline[2].after.contains("status=FINISHED"));
}
