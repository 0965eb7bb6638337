// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Muster duty rota.
//!
//! Stores the member directory, shifts with their membership lists, and the
//! audit trail in `SQLite` through Diesel. The schema is applied from embedded
//! migrations whenever a database is opened.
//!
//! ## Writes
//!
//! Every state change computed by the core crate is stored with
//! [`Persistence::persist_transition`], which writes the shift, its members,
//! any member statistics and the audit event in one database transaction.
//! Shift rows carry a version; a write made from a stale read is refused with
//! [`PersistenceError::ConcurrentModification`] instead of overwriting the
//! newer state.
//!
//! Member statistics are only ever changed by storing a finalization, and a
//! finished shift row is never written again, so a retried finalization
//! cannot credit anyone twice.
//!
//! ## Testing
//!
//! Tests run against isolated in-memory databases, see
//! [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use muster::{ShiftState, TransitionResult};
use muster_audit::AuditEvent;
use muster_domain::{Member, MemberId, Shift, ShiftId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{NewMember, NewShift};
pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
///
/// The adapter is not shared between threads by itself; the server wraps it
/// in a mutex.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call gets its own shared-cache database, so tests never see each
    /// other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_muster_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::configure_file_database(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Member Directory
    // ========================================================================

    /// Creates a member with no shift history.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_member(&mut self, member: &NewMember) -> Result<Member, PersistenceError> {
        mutations::create_member(&mut self.conn, member)
    }

    /// Marks a member inactive.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if the member does not exist.
    pub fn deactivate_member(&mut self, member_id: MemberId) -> Result<Member, PersistenceError> {
        mutations::deactivate_member(&mut self.conn, member_id)
    }

    /// Retrieves one member.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if the member does not exist.
    pub fn fetch_member(&mut self, member_id: MemberId) -> Result<Member, PersistenceError> {
        queries::fetch_member(&mut self.conn, member_id)
    }

    /// Lists every member.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_members(&mut self) -> Result<Vec<Member>, PersistenceError> {
        queries::list_members(&mut self.conn)
    }

    /// Snapshot of the active members.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_active_members(&mut self) -> Result<Vec<Member>, PersistenceError> {
        queries::fetch_active_members(&mut self.conn)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Creates an open shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift(&mut self, shift: &NewShift) -> Result<ShiftState, PersistenceError> {
        mutations::create_shift(&mut self.conn, shift)
    }

    /// Retrieves a shift with its members and version.
    ///
    /// # Errors
    ///
    /// Returns `ShiftNotFound` if the shift does not exist.
    pub fn fetch_shift(&mut self, shift_id: ShiftId) -> Result<ShiftState, PersistenceError> {
        queries::fetch_shift(&mut self.conn, shift_id)
    }

    /// Lists every shift by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shifts(&mut self) -> Result<Vec<ShiftState>, PersistenceError> {
        queries::list_shifts(&mut self.conn)
    }

    /// Finds the latest confirmed or finished shift starting before `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_most_recent_prior_shift(
        &mut self,
        target: &Shift,
    ) -> Result<Option<Shift>, PersistenceError> {
        queries::fetch_most_recent_prior_shift(&mut self.conn, target)
    }

    // ========================================================================
    // Transitions & Audit
    // ========================================================================

    /// Persists a transition result atomically.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` for stale writes, `AlreadyFinished`
    /// if the shift was finalized meanwhile, or any database error.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline of a shift, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(
        &mut self,
        shift_id: ShiftId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, shift_id)
    }
}
