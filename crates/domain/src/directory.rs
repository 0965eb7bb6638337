// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member directory snapshot.
//!
//! The directory itself lives outside the rotation engine. Rotation only ever
//! sees a snapshot of it, narrowed to the members who could be put on duty.

use crate::types::Member;

/// Returns the members that may be considered for any shift.
///
/// A member is a candidate when they are active and belong to an operational
/// category. Input order is preserved.
#[must_use]
pub fn list_eligible_candidates(directory: &[Member]) -> Vec<Member> {
    directory
        .iter()
        .filter(|m| m.active && m.category.is_operational())
        .cloned()
        .collect()
}
