// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Removal of candidates who already hold a record in the target shift.

use crate::types::{Member, Shift};

/// Outcome of filtering candidates against a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Participating members already meet the vacancy count.
    /// No new proposals should be generated.
    FullyStaffed,
    /// Candidates without any record in the shift, in input order.
    Candidates(Vec<Member>),
}

/// Number of additional participants the shift still needs.
#[must_use]
pub fn vacancies_needed(shift: &Shift) -> usize {
    (shift.vacancies as usize).saturating_sub(shift.participating_count())
}

/// Drops every candidate that already appears in `shift.members`.
///
/// Any record counts, including `Declined`: a member who turned the shift
/// down is not proposed again automatically.
#[must_use]
pub fn exclude_already_assigned(candidates: Vec<Member>, shift: &Shift) -> Eligibility {
    if vacancies_needed(shift) == 0 {
        return Eligibility::FullyStaffed;
    }

    Eligibility::Candidates(
        candidates
            .into_iter()
            .filter(|m| !shift.has_member(m.id))
            .collect(),
    )
}
