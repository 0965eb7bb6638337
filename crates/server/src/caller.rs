// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller extraction for the server.
//!
//! Every request names the member acting and the role they act in:
//!
//! - `X-Member-Id: <member id>`
//! - `X-Role: operator | member`
//! - `X-Request-Id: <id>` (optional, recorded as the audit cause)
//!
//! The member must exist and be active. Deciding who is an operator is left
//! to whatever sits in front of this server.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use muster_api::{ApiError, AuthenticatedActor, Role, authenticate};
use muster_audit::Cause;
use muster_domain::MemberId;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::AppState;

const MEMBER_ID_HEADER: &str = "x-member-id";
const ROLE_HEADER: &str = "x-role";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extractor for the authenticated caller and the audit cause of the request.
pub struct Caller {
    /// Who is acting.
    pub actor: AuthenticatedActor,
    /// Why: the request that triggered the action.
    pub cause: Cause,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = CallerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let member_id: i64 = header_value(&parts.headers, MEMBER_ID_HEADER)?
            .parse()
            .map_err(|_| {
                warn!("Member id header is not a number");
                CallerError::InvalidHeader(MEMBER_ID_HEADER)
            })?;
        let role: Role = header_value(&parts.headers, ROLE_HEADER)?
            .parse()
            .map_err(|_| CallerError::InvalidHeader(ROLE_HEADER))?;

        let mut persistence = state.persistence.lock().await;
        let actor: AuthenticatedActor =
            authenticate(&mut persistence, MemberId::new(member_id), role).map_err(|e| {
                warn!(error = %e, member_id, "Caller authentication failed");
                CallerError::Rejected(e)
            })?;
        drop(persistence);

        let description: String = format!("{} {}", parts.method, parts.uri.path());
        let cause_id: String = match parts.headers.get(REQUEST_ID_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| CallerError::InvalidHeader(REQUEST_ID_HEADER))?
                .to_string(),
            None => format!("req-{}", OffsetDateTime::now_utc().unix_timestamp_nanos()),
        };

        debug!(member_id, role = role.as_str(), cause_id = %cause_id, "Caller authenticated");

        Ok(Self {
            actor,
            cause: Cause::new(cause_id, description),
        })
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, CallerError> {
    headers
        .get(name)
        .ok_or(CallerError::MissingHeader(name))?
        .to_str()
        .map_err(|_| CallerError::InvalidHeader(name))
}

/// Caller extraction errors.
#[derive(Debug)]
pub enum CallerError {
    /// A required header is missing.
    MissingHeader(&'static str),
    /// A header is present but unreadable.
    InvalidHeader(&'static str),
    /// The named member may not act.
    Rejected(ApiError),
}

impl IntoResponse for CallerError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header"),
            Self::Rejected(err) => return crate::HttpError::from(err).into_response(),
        };
        crate::HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
        }
        .into_response()
    }
}
