// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift creation.

use diesel::SqliteConnection;
use diesel::prelude::*;
use muster::ShiftState;
use muster_domain::{ShiftId, ShiftStatus};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewShift, to_count, to_unix_nanos};
use crate::diesel_schema::shifts;
use crate::error::PersistenceError;
use crate::queries::shifts::fetch_shift;

/// Inserts an open shift with no members at version 0.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_shift(
    conn: &mut SqliteConnection,
    shift: &NewShift,
) -> Result<ShiftState, PersistenceError> {
    diesel::insert_into(shifts::table)
        .values((
            shifts::title.eq(&shift.title),
            shifts::location.eq(&shift.location),
            shifts::starts_at.eq(to_unix_nanos(shift.starts_at)?),
            shifts::ends_at.eq(to_unix_nanos(shift.ends_at)?),
            shifts::vacancies.eq(to_count(shift.vacancies)?),
            shifts::status.eq(ShiftStatus::Open.as_str()),
            shifts::version.eq(0_i64),
        ))
        .execute(conn)?;

    let shift_id: ShiftId = ShiftId::new(get_last_insert_rowid(conn)?);
    info!(%shift_id, vacancies = shift.vacancies, "Created shift");
    fetch_shift(conn, shift_id)
}
