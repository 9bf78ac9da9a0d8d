//! Outbound (Driven) ports for the Scan Processor.

use thiserror::Error;

/// Reply delivery failure. Logged by the transport, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Reply delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Delivers zero or one reply per inbound event back to the chat service.
#[async_trait::async_trait]
pub trait ReplySink: Send + Sync {
    /// `reply_token` is the transport's handle for answering one event.
    async fn deliver(&self, reply_token: &str, text: &str) -> Result<(), DeliveryError>;
}
