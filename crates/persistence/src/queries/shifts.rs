// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift queries.
//!
//! A shift is always returned together with its full membership list, in the
//! order the records were stored.

use diesel::SqliteConnection;
use diesel::prelude::*;
use muster::ShiftState;
use muster_domain::{Shift, ShiftId, ShiftMembership, ShiftStatus};

use crate::data_models::{MembershipRow, ShiftRow, to_unix_nanos};
use crate::diesel_schema::{shift_memberships, shifts};
use crate::error::PersistenceError;

fn load_memberships(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<Vec<ShiftMembership>, PersistenceError> {
    shift_memberships::table
        .filter(shift_memberships::shift_id.eq(shift_id))
        .order((
            shift_memberships::position.asc(),
            shift_memberships::membership_id.asc(),
        ))
        .select(MembershipRow::as_select())
        .load::<MembershipRow>(conn)?
        .into_iter()
        .map(ShiftMembership::try_from)
        .collect()
}

fn hydrate(conn: &mut SqliteConnection, row: ShiftRow) -> Result<ShiftState, PersistenceError> {
    let members: Vec<ShiftMembership> = load_memberships(conn, row.shift_id)?;
    let (shift, version) = row.into_shift(members)?;
    Ok(ShiftState::new(shift, version))
}

/// Retrieves a shift with its membership list and version.
///
/// # Errors
///
/// Returns `ShiftNotFound` if the shift does not exist.
pub fn fetch_shift(
    conn: &mut SqliteConnection,
    shift_id: ShiftId,
) -> Result<ShiftState, PersistenceError> {
    let row: ShiftRow = shifts::table
        .filter(shifts::shift_id.eq(shift_id.value()))
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::ShiftNotFound(shift_id))?;

    hydrate(conn, row)
}

/// Lists every shift by start time.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_shifts(conn: &mut SqliteConnection) -> Result<Vec<ShiftState>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .order((shifts::starts_at.asc(), shifts::shift_id.asc()))
        .select(ShiftRow::as_select())
        .load::<ShiftRow>(conn)?;

    rows.into_iter().map(|row| hydrate(conn, row)).collect()
}

/// Finds the shift that decides who is de-prioritized for `target`.
///
/// That is the latest shift, other than `target`, that starts strictly
/// before it and has been confirmed or finished. Shifts starting at the same
/// instant are ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn fetch_most_recent_prior_shift(
    conn: &mut SqliteConnection,
    target: &Shift,
) -> Result<Option<Shift>, PersistenceError> {
    let worked: [&str; 2] = [
        ShiftStatus::Confirmed.as_str(),
        ShiftStatus::Finished.as_str(),
    ];

    let target_start: i64 = to_unix_nanos(target.starts_at)?;

    let row: Option<ShiftRow> = shifts::table
        .filter(shifts::shift_id.ne(target.id.value()))
        .filter(shifts::starts_at.lt(target_start))
        .filter(shifts::status.eq_any(worked))
        .order((shifts::starts_at.desc(), shifts::shift_id.desc()))
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| hydrate(conn, row).map(|state| state.shift))
        .transpose()
}
