// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member directory administration.

use diesel::SqliteConnection;
use diesel::prelude::*;
use muster_domain::{Member, MemberId};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewMember;
use crate::diesel_schema::members;
use crate::error::PersistenceError;
use crate::queries::members::fetch_member;

/// Inserts a member with no shift history.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_member(
    conn: &mut SqliteConnection,
    member: &NewMember,
) -> Result<Member, PersistenceError> {
    diesel::insert_into(members::table)
        .values((
            members::display_name.eq(&member.display_name),
            members::avatar_url.eq(member.avatar.as_deref()),
            members::category.eq(member.category.as_str()),
            members::is_active.eq(1),
            members::is_operator.eq(i32::from(member.is_operator)),
            members::shifts_count.eq(0),
        ))
        .execute(conn)?;

    let member_id: MemberId = MemberId::new(get_last_insert_rowid(conn)?);
    info!(
        %member_id,
        category = %member.category,
        is_operator = member.is_operator,
        "Created member"
    );
    fetch_member(conn, member_id)
}

/// Marks a member inactive. Their history and shift records stay.
///
/// # Errors
///
/// Returns `MemberNotFound` if the member does not exist.
pub fn deactivate_member(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Member, PersistenceError> {
    let updated: usize = diesel::update(members::table)
        .filter(members::member_id.eq(member_id.value()))
        .set(members::is_active.eq(0))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::MemberNotFound(member_id));
    }

    info!(%member_id, "Deactivated member");
    fetch_member(conn, member_id)
}
