// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Soft de-prioritization of members who worked the previous shift.
//!
//! The previous shift is the most recently started shift, among those that
//! are `Confirmed` or `Finished`, whose start is strictly before the target
//! shift's start. Anyone who was `Confirmed` on it drops to the low priority
//! group. Nobody is excluded: the low priority group is drained once the high
//! priority group runs out.

use crate::types::{Member, ParticipationStatus, Shift};

/// Candidates split by whether they worked the previous shift.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriorityPartition {
    /// Did not work the previous shift.
    pub high_priority: Vec<Member>,
    /// Worked the previous shift.
    pub low_priority: Vec<Member>,
}

/// Picks the previous shift for `target` out of `shifts`.
///
/// Ties on start time resolve to the higher shift id so the choice is
/// deterministic.
#[must_use]
pub fn find_previous_shift<'a>(target: &Shift, shifts: &'a [Shift]) -> Option<&'a Shift> {
    shifts
        .iter()
        .filter(|s| s.id != target.id)
        .filter(|s| s.status.counts_as_worked())
        .filter(|s| s.starts_at < target.starts_at)
        .max_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)))
}

/// Splits candidates into high and low priority groups.
///
/// Input order is preserved inside each group.
#[must_use]
pub fn partition(candidates: Vec<Member>, previous_shift: Option<&Shift>) -> PriorityPartition {
    let Some(previous) = previous_shift else {
        return PriorityPartition {
            high_priority: candidates,
            low_priority: Vec::new(),
        };
    };

    let (low_priority, high_priority): (Vec<Member>, Vec<Member>) =
        candidates.into_iter().partition(|m| {
            previous
                .membership(m.id)
                .is_some_and(|r| r.participation_status == ParticipationStatus::Confirmed)
        });

    PriorityPartition {
        high_priority,
        low_priority,
    }
}
