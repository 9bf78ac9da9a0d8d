//! Transport adapters for the chat platform.

mod reply;
mod signature;

pub use reply::{LineReplyClient, LogReplySink, DEFAULT_REPLY_TIMEOUT, LINE_REPLY_URL};
pub use signature::{sign_body, verify_signature, SIGNATURE_HEADER};
