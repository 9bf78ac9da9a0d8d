//! [`ReplySink`] adapters.

use std::time::Duration;

use async_trait::async_trait;
use bl_03_scan_processor::{DeliveryError, ReplySink};
use serde_json::json;
use tracing::{debug, info};

/// Reply endpoint of the messaging API.
pub const LINE_REPLY_URL: &str = "https://api.line.me/v2/bot/message/reply";

/// Upper bound on one reply request.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends replies through the messaging API using the channel access token.
pub struct LineReplyClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    timeout: Duration,
}

impl LineReplyClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_endpoint(access_token, LINE_REPLY_URL)
    }

    pub fn with_endpoint(access_token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            access_token: access_token.into(),
            timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ReplySink for LineReplyClient {
    async fn deliver(&self, reply_token: &str, text: &str) -> Result<(), DeliveryError> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DeliveryError(format!("reply rejected ({status}): {detail}")));
        }

        debug!(%status, "Reply delivered");
        Ok(())
    }
}

/// Writes replies to the log. Used when no access token is configured.
#[derive(Debug, Default)]
pub struct LogReplySink;

#[async_trait]
impl ReplySink for LogReplySink {
    async fn deliver(&self, reply_token: &str, text: &str) -> Result<(), DeliveryError> {
        info!(reply_token, text, "Reply (not sent)");
        Ok(())
    }
}
