// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use muster_domain::{MemberId, ShiftId};
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The requested shift was not found.
    #[error("Shift not found: {0}")]
    ShiftNotFound(ShiftId),
    /// The requested member was not found.
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),
    /// The requested event was not found.
    #[error("Event not found: {0}")]
    EventNotFound(i64),
    /// The shift changed since it was read.
    #[error("Shift {shift_id} was modified concurrently (read at version {expected_version})")]
    ConcurrentModification {
        /// The shift.
        shift_id: ShiftId,
        /// The version the writer had read.
        expected_version: i64,
    },
    /// The shift was finalized by someone else first.
    #[error("Shift {0} is already finished")]
    AlreadyFinished(ShiftId),
    /// A stored row could not be turned back into a domain value.
    #[error("Reconstruction error: {0}")]
    ReconstructionError(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// The requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<muster_domain::DomainError> for PersistenceError {
    fn from(err: muster_domain::DomainError) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}

impl From<time::error::ComponentRange> for PersistenceError {
    fn from(err: time::error::ComponentRange) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}
