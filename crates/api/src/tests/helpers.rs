// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use muster_audit::Cause;
use muster_domain::{MemberId, ShiftId};
use muster_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    ApiResult, AuthenticatedActor, ConfirmRotationRequest, CreateMemberRequest,
    CreateShiftRequest, RespondToSummonRequest, Role, TransitionResponse, confirm_rotation,
    create_member, create_shift, respond_to_summon,
};

pub const NOW: OffsetDateTime = datetime!(2026-05-01 12:00 UTC);

/// Operators act without a directory entry in these tests so rotation never
/// picks them.
pub fn create_test_operator() -> AuthenticatedActor {
    AuthenticatedActor::new(MemberId::new(900), Role::Operator)
}

pub fn as_member(member_id: MemberId) -> AuthenticatedActor {
    AuthenticatedActor::new(member_id, Role::Member)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn add_member(persistence: &mut Persistence, name: &str) -> MemberId {
    add_member_with_category(persistence, name, None)
}

pub fn add_member_with_category(
    persistence: &mut Persistence,
    name: &str,
    category: Option<&str>,
) -> MemberId {
    let request = CreateMemberRequest {
        display_name: name.to_string(),
        avatar: None,
        category: category.map(str::to_string),
        operator: false,
    };
    create_member(persistence, &request, &create_test_operator())
        .unwrap()
        .member_id
}

pub fn add_operator(persistence: &mut Persistence, name: &str) -> MemberId {
    let request = CreateMemberRequest {
        display_name: name.to_string(),
        avatar: None,
        category: None,
        operator: true,
    };
    create_member(persistence, &request, &create_test_operator())
        .unwrap()
        .member_id
}

pub fn shift_request(starts_at: OffsetDateTime, vacancies: u32) -> CreateShiftRequest {
    CreateShiftRequest {
        title: String::from("Flood watch"),
        location: String::from("River dyke"),
        starts_at,
        ends_at: starts_at + Duration::hours(6),
        vacancies,
    }
}

pub fn add_shift(persistence: &mut Persistence, vacancies: u32) -> ShiftId {
    add_shift_at(persistence, datetime!(2026-05-10 08:00 UTC), vacancies)
}

pub fn add_shift_at(
    persistence: &mut Persistence,
    starts_at: OffsetDateTime,
    vacancies: u32,
) -> ShiftId {
    create_shift(
        persistence,
        &shift_request(starts_at, vacancies),
        &create_test_operator(),
    )
    .unwrap()
    .shift_id
}

pub fn confirm(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    member_ids: &[MemberId],
) -> ApiResult<TransitionResponse> {
    confirm_rotation(
        persistence,
        shift_id,
        &ConfirmRotationRequest {
            member_ids: member_ids.to_vec(),
        },
        &create_test_operator(),
        create_test_cause(),
        NOW,
    )
    .unwrap()
}

pub fn answer(
    persistence: &mut Persistence,
    shift_id: ShiftId,
    member_id: MemberId,
    accept: bool,
) -> ApiResult<TransitionResponse> {
    respond_to_summon(
        persistence,
        shift_id,
        member_id,
        &RespondToSummonRequest { accept },
        &as_member(member_id),
        create_test_cause(),
        NOW,
    )
    .unwrap()
}

pub fn status_of(response: &TransitionResponse, member_id: MemberId) -> String {
    response
        .shift
        .members
        .iter()
        .find(|m| m.member_id == member_id)
        .map(|m| m.participation_status.clone())
        .unwrap()
}
