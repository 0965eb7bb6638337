// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Member, MemberId, Shift, ShiftId, ShiftMembership};
use std::collections::HashSet;

/// Validates a member display name.
///
/// # Errors
///
/// Returns an error if the name is empty or only whitespace.
pub fn validate_member_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the definition of a new shift.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty
/// - The shift has no vacancies
/// - The shift does not end after it starts
pub fn validate_shift_fields(shift: &Shift) -> Result<(), DomainError> {
    if shift.title.trim().is_empty() {
        return Err(DomainError::InvalidShift(String::from(
            "Title cannot be empty",
        )));
    }

    if shift.vacancies == 0 {
        return Err(DomainError::InvalidShift(String::from(
            "A shift needs at least one vacancy",
        )));
    }

    if shift.ends_at <= shift.starts_at {
        return Err(DomainError::InvalidShift(format!(
            "Shift must end after it starts ({} is not after {})",
            shift.ends_at, shift.starts_at
        )));
    }

    Ok(())
}

/// Validates that a member may be put on duty at all.
///
/// # Errors
///
/// Returns an error if the member is inactive or an applicant.
pub const fn validate_member_can_serve(member: &Member) -> Result<(), DomainError> {
    if !member.active {
        return Err(DomainError::MemberInactive(member.id));
    }
    if !member.category.is_operational() {
        return Err(DomainError::MemberNotOperational(member.id));
    }
    Ok(())
}

/// Validates that a membership list holds at most one record per member.
///
/// # Errors
///
/// Returns an error naming the first repeated member.
pub fn validate_unique_membership(
    shift_id: ShiftId,
    members: &[ShiftMembership],
) -> Result<(), DomainError> {
    let mut seen: HashSet<MemberId> = HashSet::new();
    for record in members {
        if !seen.insert(record.member_id) {
            return Err(DomainError::DuplicateMembership {
                shift_id,
                member_id: record.member_id,
            });
        }
    }
    Ok(())
}
