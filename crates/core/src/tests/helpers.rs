// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, ShiftState, TransitionResult, apply};
use muster_audit::{Actor, Cause};
use muster_domain::{Member, MemberId, Shift, ShiftId};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-05-01 12:00 UTC);
pub const LATER: OffsetDateTime = datetime!(2026-05-02 09:30 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("operator-1"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn member(id: i64, name: &str) -> Member {
    Member::new(MemberId::new(id), name)
}

pub fn open_shift(vacancies: u32) -> ShiftState {
    ShiftState::new(
        Shift::new(
            ShiftId::new(10),
            "Flood watch",
            "River station",
            datetime!(2026-05-03 20:00 UTC),
            datetime!(2026-05-04 04:00 UTC),
            vacancies,
        ),
        1,
    )
}

/// Applies a command that is expected to succeed.
pub fn run(state: &ShiftState, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause(), NOW).unwrap()
}

pub fn run_at(state: &ShiftState, command: Command, now: OffsetDateTime) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause(), now).unwrap()
}

/// An open shift whose rotation summoned the given members.
pub fn awaiting_shift(vacancies: u32, summoned: &[Member]) -> ShiftState {
    let state: ShiftState = open_shift(vacancies);
    let members = summoned
        .iter()
        .map(|m| muster_domain::ShiftMembership::summoned(m, NOW))
        .collect();
    run(&state, Command::ConfirmRotation { members }).new_state
}

pub fn respond(member_id: i64, accept: bool) -> Command {
    Command::RespondToSummon {
        member_id: MemberId::new(member_id),
        accept,
    }
}
