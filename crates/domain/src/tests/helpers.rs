// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Member, MemberId, MembershipOrigin, ParticipationStatus, Shift, ShiftId, ShiftMembership,
    ShiftStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-05-01 12:00 UTC);

pub fn member(id: i64, name: &str, shifts_count: u32) -> Member {
    Member::new(MemberId::new(id), name).with_history(shifts_count, None)
}

pub fn record(member: &Member, status: ParticipationStatus) -> ShiftMembership {
    ShiftMembership {
        member_id: member.id,
        member_name: member.display_name.clone(),
        avatar: None,
        origin: MembershipOrigin::Rotation,
        participation_status: status,
        joined_at: datetime!(2026-04-01 09:00 UTC),
        confirmed_at: None,
    }
}

pub fn shift(id: i64, starts_at: OffsetDateTime, vacancies: u32) -> Shift {
    Shift::new(
        ShiftId::new(id),
        "Night patrol",
        "Station 1",
        starts_at,
        starts_at + time::Duration::hours(8),
        vacancies,
    )
}

pub fn worked_shift(
    id: i64,
    starts_at: OffsetDateTime,
    status: ShiftStatus,
    confirmed: &[&Member],
) -> Shift {
    let mut s = shift(id, starts_at, u32::try_from(confirmed.len()).unwrap().max(1));
    s.status = status;
    s.members = confirmed
        .iter()
        .map(|m| record(m, ParticipationStatus::Confirmed))
        .collect();
    s
}

pub fn names(records: &[ShiftMembership]) -> Vec<&str> {
    records.iter().map(|r| r.member_name.as_str()).collect()
}
