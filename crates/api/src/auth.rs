// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use muster_audit::Actor;
use muster_domain::{Member, MemberId};
use muster_persistence::{Persistence, PersistenceError};
use std::str::FromStr;

use crate::error::{ApiError, AuthError, translate_persistence_error};

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Operators run the rota.
    ///
    /// Operators may:
    /// - administer members and shifts
    /// - preview and confirm rotations
    /// - assign members directly
    /// - approve or reject volunteers
    /// - finalize shifts
    /// - act on behalf of any member
    Operator,
    /// Members act only for themselves: they volunteer and answer their own
    /// summonses.
    Member,
}

impl Role {
    /// Returns the string form used in audit records and headers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Member => "member",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "operator" => Ok(Self::Operator),
            "member" => Ok(Self::Member),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{s}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// Every actor is a member of the association; operators are members with
/// extra authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The member acting.
    pub member_id: MemberId,
    /// The role the member acts in.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(member_id: MemberId, role: Role) -> Self {
        Self { member_id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.member_id.to_string(), self.role.as_str().to_string())
    }
}

/// Resolves the caller to an authenticated actor.
///
/// The caller's identity is supplied explicitly; it must name an existing,
/// active member. The operator role is only granted to members the directory
/// marks as operators. An operator may choose to act as a plain member.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the member is unknown or inactive, and
/// `Unauthorized` if a member who is not an operator claims the role.
pub fn authenticate(
    persistence: &mut Persistence,
    member_id: MemberId,
    role: Role,
) -> Result<AuthenticatedActor, ApiError> {
    let member: Member = match persistence.fetch_member(member_id) {
        Ok(member) => member,
        Err(PersistenceError::MemberNotFound(_)) => {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown member {member_id}"),
            }
            .into());
        }
        Err(err) => return Err(translate_persistence_error(err)),
    };

    if !member.active {
        return Err(AuthError::AuthenticationFailed {
            reason: format!("Member {member_id} is not active"),
        }
        .into());
    }

    if role == Role::Operator && !member.is_operator {
        return Err(AuthError::Unauthorized {
            action: String::from("act as operator"),
            required_role: String::from("Operator"),
        }
        .into());
    }

    Ok(AuthenticatedActor::new(member_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor is an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a plain member.
    pub fn authorize_operator(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Operator => Ok(()),
            Role::Member => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Operator"),
            }),
        }
    }

    /// Checks that the actor is acting for themselves, or is an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if a member tries to act for someone else.
    pub fn authorize_self_or_operator(
        actor: &AuthenticatedActor,
        member_id: MemberId,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Operator => Ok(()),
            Role::Member if actor.member_id == member_id => Ok(()),
            Role::Member => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Operator"),
            }),
        }
    }
}
