//! # Inbound Port - MessageHandler

use shared_types::InboundMessage;

/// Processes one inbound chat message.
///
/// Returns the reply text, or `None` when the message id was already
/// processed. Never fails: every per-event error becomes a reply.
#[async_trait::async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, message: &InboundMessage) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn MessageHandler) {}
}
