// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member directory queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use muster_domain::{Member, MemberId};

use crate::data_models::MemberRow;
use crate::diesel_schema::members;
use crate::error::PersistenceError;

/// Retrieves one member.
///
/// # Errors
///
/// Returns `MemberNotFound` if the member does not exist.
pub fn fetch_member(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Member, PersistenceError> {
    let row: MemberRow = members::table
        .filter(members::member_id.eq(member_id.value()))
        .select(MemberRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::MemberNotFound(member_id))?;

    Member::try_from(row)
}

/// Lists every member, active or not, by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_members(conn: &mut SqliteConnection) -> Result<Vec<Member>, PersistenceError> {
    members::table
        .order(members::member_id.asc())
        .select(MemberRow::as_select())
        .load::<MemberRow>(conn)?
        .into_iter()
        .map(Member::try_from)
        .collect()
}

/// Snapshot of the active members, used as the rotation directory.
///
/// Applicants are included; rotation filters them out itself.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn fetch_active_members(conn: &mut SqliteConnection) -> Result<Vec<Member>, PersistenceError> {
    members::table
        .filter(members::is_active.eq(1))
        .order(members::member_id.asc())
        .select(MemberRow::as_select())
        .load::<MemberRow>(conn)?
        .into_iter()
        .map(Member::try_from)
        .collect()
}
