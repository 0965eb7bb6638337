// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod caller;
mod live;


use axum::{
    Json, Router,
    extract::{FromRef, Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use muster_api::{
    ApiError, ApiResult, AuditEventInfo, ConfirmRotationRequest, CreateMemberRequest,
    CreateShiftRequest, MemberInfo, MemberRequest, RespondToSummonRequest,
    RotationPreviewResponse, ShiftInfo, TransitionResponse,
};
use muster_domain::{Member, MemberCategory, MemberId, ShiftId};
use muster_persistence::{NewMember, Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::caller::Caller;
use crate::live::{LiveEventBroadcaster, live_events_handler};

/// Muster Server - HTTP server for the Muster duty rota
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Creates an operator with this name if the directory has none
    #[arg(long)]
    bootstrap_operator: Option<String>,
}

/// Creates the first operator of an empty or operator-less directory.
///
/// Returns `None` when an operator already exists.
fn bootstrap_operator(
    persistence: &mut Persistence,
    display_name: &str,
) -> Result<Option<Member>, PersistenceError> {
    if persistence
        .list_members()?
        .iter()
        .any(|member| member.is_operator)
    {
        return Ok(None);
    }

    let operator: Member = persistence.create_member(&NewMember {
        display_name: display_name.trim().to_string(),
        avatar: None,
        category: MemberCategory::Operational,
        is_operator: true,
    })?;
    Ok(Some(operator))
}

/// Application state shared across handlers.
///
/// Every shift mutation holds the persistence lock from read to write, so
/// transitions on the same shift never interleave inside this process.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::AlreadyAssigned { .. }
            | ApiError::NotSummoned { .. }
            | ApiError::InvalidStateTransition { .. }
            | ApiError::AlreadyFinished { .. }
            | ApiError::ConcurrentModification { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_client_error() {
            warn!(status = status.as_u16(), error = %err, "Request refused");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Publishes the events of a stored transition and returns its response.
fn publish(
    app_state: &AppState,
    result: ApiResult<TransitionResponse>,
) -> Json<TransitionResponse> {
    app_state.broadcaster.publish(&result.events);
    Json(result.response)
}

// ============================================================================
// Member Directory
// ============================================================================

/// Handler for GET `/members`.
async fn handle_list_members(
    AxumState(app_state): AxumState<AppState>,
    _caller: Caller,
) -> Result<Json<Vec<MemberInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::list_members(&mut persistence)?))
}

/// Handler for POST `/members`.
async fn handle_create_member(
    AxumState(app_state): AxumState<AppState>,
    caller: Caller,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Json<MemberInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::create_member(
        &mut persistence,
        &req,
        &caller.actor,
    )?))
}

/// Handler for POST `/members/{member_id}/deactivate`.
async fn handle_deactivate_member(
    AxumState(app_state): AxumState<AppState>,
    Path(member_id): Path<i64>,
    caller: Caller,
) -> Result<Json<MemberInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::deactivate_member(
        &mut persistence,
        MemberId::new(member_id),
        &caller.actor,
    )?))
}

// ============================================================================
// Shifts
// ============================================================================

/// Handler for GET `/shifts`.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
    _caller: Caller,
) -> Result<Json<Vec<ShiftInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::list_shifts(&mut persistence)?))
}

/// Handler for POST `/shifts`.
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    caller: Caller,
    Json(req): Json<CreateShiftRequest>,
) -> Result<Json<ShiftInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::create_shift(
        &mut persistence,
        &req,
        &caller.actor,
    )?))
}

/// Handler for GET `/shifts/{shift_id}`.
async fn handle_get_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    _caller: Caller,
) -> Result<Json<ShiftInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::get_shift(
        &mut persistence,
        ShiftId::new(shift_id),
    )?))
}

// ============================================================================
// Rotation
// ============================================================================

/// Handler for GET `/shifts/{shift_id}/rotation/preview`.
///
/// Computes a proposal and stores nothing.
async fn handle_preview_rotation(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    caller: Caller,
) -> Result<Json<RotationPreviewResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::preview_rotation(
        &mut persistence,
        ShiftId::new(shift_id),
        &caller.actor,
        OffsetDateTime::now_utc(),
    )?))
}

/// Handler for POST `/shifts/{shift_id}/rotation/confirm`.
async fn handle_confirm_rotation(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    caller: Caller,
    Json(req): Json<ConfirmRotationRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(shift_id, members = req.member_ids.len(), "Handling confirm rotation request");

    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::confirm_rotation(
        &mut persistence,
        ShiftId::new(shift_id),
        &req,
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

// ============================================================================
// Membership
// ============================================================================

/// Handler for POST `/shifts/{shift_id}/volunteer`.
async fn handle_volunteer(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    caller: Caller,
    Json(req): Json<MemberRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::volunteer(
        &mut persistence,
        ShiftId::new(shift_id),
        &req,
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

/// Handler for POST `/shifts/{shift_id}/assign`.
async fn handle_assign_member(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    caller: Caller,
    Json(req): Json<MemberRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::assign_member(
        &mut persistence,
        ShiftId::new(shift_id),
        &req,
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

/// Handler for POST `/shifts/{shift_id}/volunteers/{member_id}/approve`.
async fn handle_approve_volunteer(
    AxumState(app_state): AxumState<AppState>,
    Path((shift_id, member_id)): Path<(i64, i64)>,
    caller: Caller,
) -> Result<Json<TransitionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::approve_volunteer(
        &mut persistence,
        ShiftId::new(shift_id),
        MemberId::new(member_id),
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

/// Handler for POST `/shifts/{shift_id}/volunteers/{member_id}/reject`.
async fn handle_reject_volunteer(
    AxumState(app_state): AxumState<AppState>,
    Path((shift_id, member_id)): Path<(i64, i64)>,
    caller: Caller,
) -> Result<Json<TransitionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::reject_volunteer(
        &mut persistence,
        ShiftId::new(shift_id),
        MemberId::new(member_id),
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

/// Handler for POST `/shifts/{shift_id}/summons/{member_id}/respond`.
async fn handle_respond_to_summon(
    AxumState(app_state): AxumState<AppState>,
    Path((shift_id, member_id)): Path<(i64, i64)>,
    caller: Caller,
    Json(req): Json<RespondToSummonRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::respond_to_summon(
        &mut persistence,
        ShiftId::new(shift_id),
        MemberId::new(member_id),
        &req,
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

/// Handler for POST `/shifts/{shift_id}/finalize`.
async fn handle_finalize_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    caller: Caller,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(shift_id, "Handling finalize request");

    let mut persistence = app_state.persistence.lock().await;
    let result = muster_api::finalize_shift(
        &mut persistence,
        ShiftId::new(shift_id),
        &caller.actor,
        caller.cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(publish(&app_state, result))
}

/// Handler for GET `/shifts/{shift_id}/audit`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    caller: Caller,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(muster_api::get_audit_timeline(
        &mut persistence,
        ShiftId::new(shift_id),
        &caller.actor,
    )?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/members", get(handle_list_members).post(handle_create_member))
        .route(
            "/members/{member_id}/deactivate",
            post(handle_deactivate_member),
        )
        .route("/shifts", get(handle_list_shifts).post(handle_create_shift))
        .route("/shifts/{shift_id}", get(handle_get_shift))
        .route(
            "/shifts/{shift_id}/rotation/preview",
            get(handle_preview_rotation),
        )
        .route(
            "/shifts/{shift_id}/rotation/confirm",
            post(handle_confirm_rotation),
        )
        .route("/shifts/{shift_id}/volunteer", post(handle_volunteer))
        .route("/shifts/{shift_id}/assign", post(handle_assign_member))
        .route(
            "/shifts/{shift_id}/volunteers/{member_id}/approve",
            post(handle_approve_volunteer),
        )
        .route(
            "/shifts/{shift_id}/volunteers/{member_id}/reject",
            post(handle_reject_volunteer),
        )
        .route(
            "/shifts/{shift_id}/summons/{member_id}/respond",
            post(handle_respond_to_summon),
        )
        .route("/shifts/{shift_id}/finalize", post(handle_finalize_shift))
        .route("/shifts/{shift_id}/audit", get(handle_get_audit_timeline))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Muster Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(name) = &args.bootstrap_operator {
        match bootstrap_operator(&mut persistence, name)? {
            Some(operator) => info!(member_id = %operator.id, "Bootstrapped operator"),
            None => warn!("Directory already has an operator; skipping bootstrap"),
        }
    }

    let app: Router = build_router(AppState::new(persistence));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
