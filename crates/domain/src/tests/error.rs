// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, MemberId, ParticipationStatus, ShiftId, ShiftStatus};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::ShiftNotFound(ShiftId::new(9));
    assert_eq!(format!("{err}"), "Shift 9 not found");

    let err: DomainError = DomainError::AlreadyAssigned {
        shift_id: ShiftId::new(9),
        member_id: MemberId::new(4),
    };
    assert_eq!(
        format!("{err}"),
        "Member 4 is already assigned to shift 9"
    );

    let err: DomainError = DomainError::NotSummoned {
        shift_id: ShiftId::new(9),
        member_id: MemberId::new(4),
    };
    assert_eq!(format!("{err}"), "Member 4 was not summoned to shift 9");

    let err: DomainError = DomainError::InvalidStateTransition {
        shift_id: ShiftId::new(9),
        status: ShiftStatus::Finished,
        action: "volunteer for",
    };
    assert_eq!(
        format!("{err}"),
        "Cannot volunteer for shift 9 while it is FINISHED"
    );

    let err: DomainError = DomainError::InvalidParticipationState {
        shift_id: ShiftId::new(9),
        member_id: MemberId::new(4),
        action: "respond for",
        expected: ParticipationStatus::Pending,
        actual: ParticipationStatus::Declined,
    };
    assert_eq!(
        format!("{err}"),
        "Cannot respond for member 4 in shift 9: record is DECLINED, expected PENDING"
    );

    let err: DomainError = DomainError::AlreadyFinished(ShiftId::new(9));
    assert_eq!(format!("{err}"), "Shift 9 is already finished");

    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");
}
