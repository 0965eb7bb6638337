// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod transition_tests;

use crate::{NewMember, NewShift, Persistence};
use muster::{Command, ShiftState, TransitionResult, apply};
use muster_audit::{Actor, Cause};
use muster_domain::{Member, MemberCategory};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-05-01 12:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("operator-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_member(persistence: &mut Persistence, name: &str) -> Member {
    persistence
        .create_member(&NewMember {
            display_name: name.to_string(),
            avatar: None,
            category: MemberCategory::Operational,
            is_operator: false,
        })
        .unwrap()
}

pub fn new_shift(starts_at: OffsetDateTime, vacancies: u32) -> NewShift {
    NewShift {
        title: String::from("Night patrol"),
        location: String::from("Station 1"),
        starts_at,
        ends_at: starts_at + time::Duration::hours(8),
        vacancies,
    }
}

pub fn create_test_shift(persistence: &mut Persistence, vacancies: u32) -> ShiftState {
    persistence
        .create_shift(&new_shift(datetime!(2026-05-03 20:00 UTC), vacancies))
        .unwrap()
}

/// Applies a command and stores the result, returning the stored shift.
pub fn apply_and_store(
    persistence: &mut Persistence,
    state: &ShiftState,
    command: Command,
) -> ShiftState {
    let result: TransitionResult =
        apply(state, command, create_test_actor(), create_test_cause(), NOW).unwrap();
    persistence.persist_transition(&result).unwrap();
    persistence.fetch_shift(state.shift.id).unwrap()
}
