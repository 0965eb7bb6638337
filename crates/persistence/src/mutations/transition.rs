// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storing transitions.
//!
//! A transition is written in one database transaction:
//!
//! 1. Compare-and-set the shift row on the version it was read at, refusing
//!    to touch a finished shift
//! 2. Replace the membership list
//! 3. Credit confirmed members when the shift was finalized
//! 4. Append the audit event
//!
//! Any failure rolls the whole transition back.

use diesel::SqliteConnection;
use diesel::prelude::*;
use muster::{MemberStatsUpdate, TransitionResult};
use muster_domain::{Shift, ShiftId, ShiftStatus};
use tracing::{debug, info, warn};

use crate::data_models::to_unix_nanos;
use crate::diesel_schema::{members, shift_memberships, shifts};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// What storing a transition produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// ID of the stored audit event.
    pub event_id: i64,
    /// The shift's version after the write.
    pub version: i64,
}

/// Persists a transition result atomically.
///
/// # Errors
///
/// Returns an error if:
/// - The shift no longer exists (`ShiftNotFound`)
/// - The shift was finalized meanwhile (`AlreadyFinished`)
/// - The shift changed since it was read (`ConcurrentModification`)
/// - A credited member does not exist (`MemberNotFound`)
/// - Any statement fails
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction::<PersistTransitionResult, PersistenceError, _>(|conn| {
        let shift: &Shift = &result.new_state.shift;
        let read_version: i64 = result.new_state.version;

        let version: i64 = update_shift_row(conn, result)?;
        replace_memberships(conn, shift)?;
        for update in &result.stats_updates {
            credit_member(conn, update)?;
        }
        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;

        info!(
            shift_id = %shift.id,
            action = %result.audit_event.action.name,
            status = %shift.status,
            read_version,
            version,
            event_id,
            credited = result.stats_updates.len(),
            "Persisted transition"
        );
        Ok(PersistTransitionResult { event_id, version })
    })
}

fn update_shift_row(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let shift: &Shift = &result.new_state.shift;
    let read_version: i64 = result.new_state.version;
    let finalized_at: Option<i64> = (shift.status == ShiftStatus::Finished)
        .then(|| to_unix_nanos(result.audit_event.recorded_at))
        .transpose()?;

    let updated: usize = diesel::update(shifts::table)
        .filter(shifts::shift_id.eq(shift.id.value()))
        .filter(shifts::version.eq(read_version))
        .filter(shifts::status.ne(ShiftStatus::Finished.as_str()))
        .set((
            shifts::status.eq(shift.status.as_str()),
            shifts::version.eq(read_version + 1),
            shifts::finalized_at.eq(finalized_at),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(explain_rejected_write(conn, shift.id, read_version)?);
    }
    Ok(read_version + 1)
}

/// Works out why the compare-and-set matched no row.
fn explain_rejected_write(
    conn: &mut SqliteConnection,
    shift_id: ShiftId,
    expected_version: i64,
) -> Result<PersistenceError, PersistenceError> {
    let stored: Option<(String, i64)> = shifts::table
        .filter(shifts::shift_id.eq(shift_id.value()))
        .select((shifts::status, shifts::version))
        .first(conn)
        .optional()?;

    let err: PersistenceError = match stored {
        None => PersistenceError::ShiftNotFound(shift_id),
        Some((status, _)) if status == ShiftStatus::Finished.as_str() => {
            PersistenceError::AlreadyFinished(shift_id)
        }
        Some((_, version)) => {
            debug!(%shift_id, expected_version, version, "Version mismatch");
            PersistenceError::ConcurrentModification {
                shift_id,
                expected_version,
            }
        }
    };
    warn!(%shift_id, error = %err, "Rejected shift write");
    Ok(err)
}

fn replace_memberships(conn: &mut SqliteConnection, shift: &Shift) -> Result<(), PersistenceError> {
    diesel::delete(shift_memberships::table)
        .filter(shift_memberships::shift_id.eq(shift.id.value()))
        .execute(conn)?;

    for (position, record) in shift.members.iter().enumerate() {
        let position: i32 = i32::try_from(position)
            .map_err(|_| PersistenceError::QueryFailed("Too many members".to_string()))?;
        diesel::insert_into(shift_memberships::table)
            .values((
                shift_memberships::shift_id.eq(shift.id.value()),
                shift_memberships::member_id.eq(record.member_id.value()),
                shift_memberships::member_name.eq(&record.member_name),
                shift_memberships::avatar_url.eq(record.avatar.as_deref()),
                shift_memberships::origin.eq(record.origin.as_str()),
                shift_memberships::participation_status.eq(record.participation_status.as_str()),
                shift_memberships::joined_at.eq(to_unix_nanos(record.joined_at)?),
                shift_memberships::confirmed_at.eq(record.confirmed_at.map(to_unix_nanos).transpose()?),
                shift_memberships::position.eq(position),
            ))
            .execute(conn)?;
    }

    debug!(shift_id = %shift.id, members = shift.members.len(), "Stored membership list");
    Ok(())
}

fn credit_member(
    conn: &mut SqliteConnection,
    update: &MemberStatsUpdate,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(members::table)
        .filter(members::member_id.eq(update.member_id.value()))
        .set((
            members::shifts_count.eq(members::shifts_count + 1),
            members::last_shift_date.eq(Some(to_unix_nanos(update.finalized_at)?)),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::MemberNotFound(update.member_id));
    }
    debug!(member_id = %update.member_id, "Credited member with a shift");
    Ok(())
}
