// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Muster duty rota.
//!
//! Turns requests from operators and members into core commands, enforces
//! who may do what, stores the outcome and maps every failure onto the
//! [`ApiError`] contract. Transport concerns live in the server crate.

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

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ApiResult, approve_volunteer, assign_member, confirm_rotation, create_member, create_shift,
    deactivate_member, finalize_shift, get_audit_timeline, get_shift, list_members, list_shifts,
    preview_rotation, reject_volunteer, respond_to_summon, volunteer,
};
pub use request_response::{
    AuditEventInfo, ConfirmRotationRequest, CreateMemberRequest, CreateShiftRequest, MemberInfo,
    MemberRequest, MembershipInfo, NoticeInfo, RespondToSummonRequest, RotationPreviewResponse,
    ShiftInfo, ShortfallInfo, TransitionResponse,
};
