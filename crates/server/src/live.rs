// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live shift notifications for operator and member screens.
//!
//! Events are published only after the transition that produced them has
//! been stored. They say what changed, never what to do; clients fetch the
//! shift over HTTP for authoritative data.
//!
//! - Every event goes to every connected client
//! - Nothing is executed over the socket
//! - Streaming produces no audit events

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use muster::ShiftEvent;
use muster_domain::{MemberId, ParticipationStatus, ShiftId, ShiftStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Events buffered per subscriber. Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 100;

/// A notification sent to live subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A member's record in a shift was created, changed or removed.
    MembershipChanged {
        /// The shift.
        shift_id: ShiftId,
        /// The member.
        member_id: MemberId,
        /// The record's new status; absent when the record was removed.
        status: Option<ParticipationStatus>,
    },
    /// A shift moved to a new lifecycle state.
    StatusChanged {
        /// The shift.
        shift_id: ShiftId,
        /// Previous state.
        from: ShiftStatus,
        /// New state.
        to: ShiftStatus,
    },
    /// A shift was closed and its crew credited.
    ShiftFinalized {
        /// The shift.
        shift_id: ShiftId,
        /// Members credited with the shift.
        confirmed: Vec<MemberId>,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
}

impl From<&ShiftEvent> for LiveEvent {
    fn from(event: &ShiftEvent) -> Self {
        match event {
            ShiftEvent::MembershipChanged {
                shift_id,
                member_id,
                status,
            } => Self::MembershipChanged {
                shift_id: *shift_id,
                member_id: *member_id,
                status: *status,
            },
            ShiftEvent::StatusChanged { shift_id, from, to } => Self::StatusChanged {
                shift_id: *shift_id,
                from: *from,
                to: *to,
            },
            ShiftEvent::ShiftFinalized {
                shift_id,
                confirmed,
            } => Self::ShiftFinalized {
                shift_id: *shift_id,
                confirmed: confirmed.clone(),
            },
        }
    }
}

/// Fan-out of live events to every connected client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// Never blocks. With no clients connected the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Publishes the events of a stored transition, in order.
    pub fn publish(&self, events: &[ShiftEvent]) {
        for event in events {
            self.broadcast(&LiveEvent::from(event));
        }
    }

    /// Subscribes to events broadcast from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for GET `/live`. Upgrades to a WebSocket and streams events.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Clients have nothing to say; only watch for the close
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
