// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fair ordering of rotation candidates.
//!
//! ## Ordering Rules (Authoritative)
//!
//! Members are ordered, most eligible first, by:
//! 1. Cumulative shift count (lowest wins)
//! 2. Tie Breaker 1: Last shift date (earliest wins, never-served sorts first)
//! 3. Tie Breaker 2: Display name, by Unicode collation (root locale), then
//!    by code point
//!
//! Collation puts accented names where a reader expects them: "Ângela"
//! sorts with the A's, not after "Zé".
//!
//! ## Invariants
//!
//! - The ordering is total over distinct names
//! - Members with identical names keep their input order (stable sort)

use crate::types::Member;
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use std::cmp::Ordering;

/// Compares display names.
///
/// Falls back to case-folded code point order if no collation data is
/// available.
struct NameCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    fn new() -> Self {
        // Default strength is tertiary: base letter, then accents, then case
        Self {
            collator: Collator::try_new(
                CollatorPreferences::default(),
                CollatorOptions::default(),
            )
            .ok(),
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        let collated: Ordering = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        collated.then_with(|| a.cmp(b))
    }
}

/// Compares two members by the fairness rules.
///
/// Returns:
/// - `Ordering::Less` if `a` should be summoned before `b`
/// - `Ordering::Greater` if `b` should be summoned before `a`
/// - `Ordering::Equal` only when all three rules tie
#[must_use]
pub fn compare_fairness(a: &Member, b: &Member) -> Ordering {
    compare_with(&NameCollator::new(), a, b)
}

/// Sorts members in place, most eligible first.
///
/// The sort is stable.
pub fn sort_fairly(members: &mut [Member]) {
    let names: NameCollator = NameCollator::new();
    members.sort_by(|a, b| compare_with(&names, a, b));
}

fn compare_with(names: &NameCollator, a: &Member, b: &Member) -> Ordering {
    // 1. Fewer shifts worked goes first
    match a.shifts_count.cmp(&b.shifts_count) {
        Ordering::Equal => {}
        other => return other,
    }

    // 2. Longest rested goes first; never served counts as earliest
    match (a.last_shift_date, b.last_shift_date) {
        (None, None) => {}
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(date_a), Some(date_b)) => match date_a.cmp(&date_b) {
            Ordering::Equal => {}
            other => return other,
        },
    }

    // 3. Name
    names.compare(&a.display_name, &b.display_name)
}
