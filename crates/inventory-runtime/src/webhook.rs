//! # Chat Webhook
//!
//! HTTP surface of the runtime:
//!
//! | Route            | Behavior                                            |
//! |------------------|-----------------------------------------------------|
//! | `POST /callback` | Verify signature, process text message events, 200 |
//! | `GET /health`    | Liveness probe, returns `ok`                        |
//!
//! A callback with a bad signature or an unparseable body is answered with
//! 400. Otherwise every text message event is handed to the
//! [`MessageHandler`] in order and its reply (if any) is delivered through the
//! [`ReplySink`] using the event's reply token. Delivery failures are logged
//! and never turn into a non-200 response, so the platform does not redeliver
//! events whose effects are already persisted.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use bl_03_scan_processor::{MessageHandler, ReplySink};
use serde::Deserialize;
use shared_types::InboundMessage;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::adapters::{verify_signature, SIGNATURE_HEADER};

/// Shared state of the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<dyn MessageHandler>,
    pub sink: Arc<dyn ReplySink>,
    /// `None` disables signature checks (development only).
    pub channel_secret: Option<Arc<[u8]>>,
}

impl WebhookState {
    pub fn new(
        handler: Arc<dyn MessageHandler>,
        sink: Arc<dyn ReplySink>,
        channel_secret: Option<&str>,
    ) -> Self {
        Self {
            handler,
            sink,
            channel_secret: channel_secret.map(|s| Arc::from(s.as_bytes())),
        }
    }
}

/// Builds the router.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn callback(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    if let Some(secret) = &state.channel_secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !verify_signature(secret, &body, signature) {
            warn!("Rejected callback with invalid signature");
            return (StatusCode::BAD_REQUEST, "invalid signature");
        }
    }

    let payload: CallbackBody = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Rejected unparseable callback body");
            return (StatusCode::BAD_REQUEST, "invalid body");
        }
    };

    for event in payload.events {
        let Some((reply_token, message)) = event.into_text_message() else {
            continue;
        };

        let Some(reply) = state.handler.handle(&message).await else {
            debug!(message_id = %message.message_id, "Duplicate delivery, no reply");
            continue;
        };

        let Some(reply_token) = reply_token else {
            debug!(message_id = %message.message_id, "Event carries no reply token");
            continue;
        };

        if let Err(e) = state.sink.deliver(&reply_token, &reply).await {
            warn!(message_id = %message.message_id, error = %e, "Reply delivery failed");
        }
    }

    (StatusCode::OK, "OK")
}

/// Callback request body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CallbackBody {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Returns the reply token and message for text message events.
    pub fn into_text_message(self) -> Option<(Option<String>, InboundMessage)> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message?;
        if message.kind != "text" {
            return None;
        }
        let user_id = self.source.and_then(|s| s.user_id).unwrap_or_default();
        let text = message.text.unwrap_or_default();
        Some((
            self.reply_token,
            InboundMessage::new(message.id, user_id, text),
        ))
    }
}
