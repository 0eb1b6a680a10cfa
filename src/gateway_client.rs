use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::models::message::Message;

#[derive(Debug)]
pub enum GatewayClientError {
    Http(reqwest::Error),
}

impl fmt::Display for GatewayClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayClientError::Http(e) if e.is_timeout() => {
                write!(f, "gateway call timed out: {e}")
            }
            GatewayClientError::Http(e) => write!(f, "HTTP error: {e}"),
        }
    }
}

impl From<reqwest::Error> for GatewayClientError {
    fn from(e: reqwest::Error) -> Self {
        GatewayClientError::Http(e)
    }
}

/// How the gateway answered one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 204 — the gateway accepted the message for this connection.
    Delivered,
    /// 404 — the gateway no longer knows this connection id; the caller
    /// should purge it from the directory.
    Stale,
    /// Any other status. Delivery to sibling connections continues.
    Failed(StatusCode),
}

/// Client for the gateway's per-connection message endpoint.
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    /// `timeout` bounds each delivery call; a hung gateway call must not
    /// hold a dispatch slot forever.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }

    /// POST the message to `{base_url}/message/{conn_id}`, exactly one
    /// attempt, and classify the response. Transport-level failures
    /// (including timeouts) surface as `GatewayClientError`.
    pub async fn deliver(
        &self,
        conn_id: &str,
        message: &Message,
    ) -> Result<DeliveryOutcome, GatewayClientError> {
        let url = format!("{}/message/{}", self.base_url, conn_id);
        let resp = self.client.post(&url).json(message).send().await?;

        let outcome = match resp.status() {
            StatusCode::NO_CONTENT => DeliveryOutcome::Delivered,
            StatusCode::NOT_FOUND => DeliveryOutcome::Stale,
            status => DeliveryOutcome::Failed(status),
        };
        Ok(outcome)
    }
}
