// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use muster::CoreError;
use muster_domain::DomainError;
use muster_persistence::PersistenceError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description.
        message: String,
    },
    /// The member already holds a record in the shift.
    #[error("{message}")]
    AlreadyAssigned {
        /// A human-readable description.
        message: String,
    },
    /// The responder was never summoned to the shift.
    #[error("{message}")]
    NotSummoned {
        /// A human-readable description.
        message: String,
    },
    /// The shift or record is in a state that does not allow the action.
    #[error("{message}")]
    InvalidStateTransition {
        /// A human-readable description.
        message: String,
    },
    /// The shift has already been finalized.
    #[error("{message}")]
    AlreadyFinished {
        /// A human-readable description.
        message: String,
    },
    /// Another request changed the shift first; retry with fresh data.
    #[error("{message}")]
    ConcurrentModification {
        /// A human-readable description.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A human-readable description.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::ShiftNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift"),
            message,
        },
        DomainError::MemberNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Member"),
            message,
        },
        DomainError::MembershipNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Membership"),
            message,
        },
        DomainError::AlreadyAssigned { .. } => ApiError::AlreadyAssigned { message },
        DomainError::NotSummoned { .. } => ApiError::NotSummoned { message },
        DomainError::InvalidStateTransition { .. }
        | DomainError::InvalidParticipationState { .. } => {
            ApiError::InvalidStateTransition { message }
        }
        DomainError::AlreadyFinished(_) => ApiError::AlreadyFinished { message },
        DomainError::MemberInactive(_) => rule_violation("active_member", message),
        DomainError::MemberNotOperational(_) => rule_violation("operational_member", message),
        DomainError::VacanciesExceeded { .. } => rule_violation("vacancies", message),
        DomainError::DuplicateMembership { .. } => rule_violation("unique_membership", message),
        DomainError::InvalidProposedRecord { .. } => invalid_input("member_ids", message),
        DomainError::InvalidName(_) => invalid_input("display_name", message),
        DomainError::InvalidShift(_) => invalid_input("shift", message),
        DomainError::InvalidShiftStatus(_) => invalid_input("status", message),
        DomainError::InvalidParticipationStatus(_) => {
            invalid_input("participation_status", message)
        }
        DomainError::InvalidMembershipOrigin(_) => invalid_input("origin", message),
        DomainError::InvalidMemberCategory(_) => invalid_input("category", message),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Lookups that miss and lost write races keep their own kinds; everything
/// else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let message: String = err.to_string();
    match err {
        PersistenceError::ShiftNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift"),
            message,
        },
        PersistenceError::MemberNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Member"),
            message,
        },
        PersistenceError::EventNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message,
        },
        PersistenceError::ConcurrentModification { .. } => {
            ApiError::ConcurrentModification { message }
        }
        PersistenceError::AlreadyFinished(_) => ApiError::AlreadyFinished { message },
        _ => ApiError::Internal { message },
    }
}
