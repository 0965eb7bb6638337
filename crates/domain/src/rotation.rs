// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation selection.
//!
//! Fills the open vacancies of a shift from the member directory:
//!
//! 1. Keep every record that is not `Declined`
//! 2. Work out how many vacancies remain; stop if none
//! 3. Drop candidates who already hold any record in the shift
//! 4. Split the rest by whether they worked the previous shift, and sort each
//!    group with the fairness rules
//! 5. Drain the high priority group, then the low priority group
//! 6. Turn each pick into a `Rotation`/`Pending` summons
//!
//! Selection is advisory. Nothing is written until an operator confirms.

use crate::directory::list_eligible_candidates;
use crate::eligibility::{Eligibility, exclude_already_assigned, vacancies_needed};
use crate::fair_order::sort_fairly;
use crate::partition::{PriorityPartition, partition};
use crate::types::{Member, MemberId, Shift, ShiftMembership};
use time::OffsetDateTime;

/// Not enough eligible members to fill every vacancy.
///
/// This is an expected steady state that needs an operator, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientCandidates {
    /// Vacancies that needed filling.
    pub needed: usize,
    /// Members that could be proposed.
    pub available: usize,
}

/// The result of a rotation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationProposal {
    /// Current participating records followed by the new summons.
    pub members: Vec<ShiftMembership>,
    /// Members picked by this run, in selection order.
    pub newly_selected: Vec<MemberId>,
    /// How many of the picks came from the low priority group.
    pub from_low_priority: usize,
    /// Set when the vacancies could not all be filled.
    pub shortfall: Option<InsufficientCandidates>,
}

impl RotationProposal {
    /// Whether this run added nobody.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.newly_selected.is_empty()
    }
}

/// Proposes members for the remaining vacancies of `shift`.
///
/// `directory` is the full member snapshot; inactive members and applicants
/// are filtered out here. `previous_shift` is the shift that decides who is
/// de-prioritized, if any.
#[must_use]
pub fn propose_rotation(
    shift: &Shift,
    directory: &[Member],
    previous_shift: Option<&Shift>,
    now: OffsetDateTime,
) -> RotationProposal {
    let currently_participating: Vec<ShiftMembership> = shift.participating();
    let needed: usize = vacancies_needed(shift);

    let eligible: Vec<Member> =
        match exclude_already_assigned(list_eligible_candidates(directory), shift) {
            Eligibility::FullyStaffed => {
                return RotationProposal {
                    members: currently_participating,
                    newly_selected: Vec::new(),
                    from_low_priority: 0,
                    shortfall: None,
                };
            }
            Eligibility::Candidates(candidates) => candidates,
        };

    let PriorityPartition {
        mut high_priority,
        mut low_priority,
    } = partition(eligible, previous_shift);
    sort_fairly(&mut high_priority);
    sort_fairly(&mut low_priority);

    let available: usize = high_priority.len() + low_priority.len();
    let from_high: usize = needed.min(high_priority.len());
    let from_low: usize = (needed - from_high).min(low_priority.len());

    let selected: Vec<&Member> = high_priority
        .iter()
        .take(from_high)
        .chain(low_priority.iter().take(from_low))
        .collect();

    let newly_selected: Vec<MemberId> = selected.iter().map(|m| m.id).collect();
    let mut members: Vec<ShiftMembership> = currently_participating;
    members.extend(selected.into_iter().map(|m| ShiftMembership::summoned(m, now)));

    let shortfall: Option<InsufficientCandidates> =
        (available < needed).then_some(InsufficientCandidates { needed, available });

    RotationProposal {
        members,
        newly_selected,
        from_low_priority: from_low,
        shortfall,
    }
}
