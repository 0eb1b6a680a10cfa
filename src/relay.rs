use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use reqwest::StatusCode;

use crate::conntrack::ConnectionTracker;
use crate::gateway_client::{DeliveryOutcome, GatewayClient};
use crate::metrics::Metrics;
use crate::models::message::Message;

/// Upper bound on concurrently in-flight recipient tasks per dispatch.
pub const MAX_CONCURRENT_SENDS: usize = 4;

/// Aggregate result of one recipient's sub-dispatch. Defaults to `Ok` and
/// is overwritten by the last non-stale failure observed; stale
/// connections are cleaned up without affecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientStatus {
    Ok,
    /// Last non-204, non-404 status the gateway returned.
    Failed(StatusCode),
    /// Transport-level failure (connect error, timeout).
    Error(String),
}

#[derive(Debug, Clone)]
pub struct RecipientOutcome {
    pub user_id: String,
    /// Connection ids attempted, per the directory snapshot taken at
    /// dispatch time.
    pub connections_tried: usize,
    pub status: RecipientStatus,
}

/// Per-recipient outcomes of one dispatch. Every recipient appears
/// exactly once; a failure in one never suppresses the others.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<RecipientOutcome>,
}

impl DispatchReport {
    pub fn all_ok(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.status == RecipientStatus::Ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecipientOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status != RecipientStatus::Ok)
    }
}

/// Fans one inbound message out to every live connection of every
/// recipient: bounded concurrency across recipients, strictly sequential
/// delivery within a recipient.
pub struct RelayDispatcher {
    conntrack: Arc<ConnectionTracker>,
    gateway: GatewayClient,
    metrics: Arc<Metrics>,
}

impl RelayDispatcher {
    pub fn new(
        conntrack: Arc<ConnectionTracker>,
        gateway: GatewayClient,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            conntrack,
            gateway,
            metrics,
        }
    }

    /// Single-pass fan-out: at most `min(recipients, 4)` recipient tasks
    /// in flight, no retries, no cross-recipient ordering. Waits for every
    /// task; per-recipient errors are captured into the report rather
    /// than aborting the join.
    pub async fn dispatch(&self, message: &Message) -> DispatchReport {
        let limit = message.recipients.len().min(MAX_CONCURRENT_SENDS);
        if limit == 0 {
            return DispatchReport::default();
        }

        let deliveries: Vec<_> = message
            .recipients
            .iter()
            .map(|recipient| self.deliver_to_user(recipient, message))
            .collect();
        let outcomes = stream::iter(deliveries)
            .buffer_unordered(limit)
            .collect::<Vec<_>>()
            .await;

        DispatchReport { outcomes }
    }

    /// One recipient's sub-dispatch: snapshot the directory listing once,
    /// then deliver to each connection id in listing order, one
    /// outstanding gateway call at a time.
    async fn deliver_to_user(&self, user_id: &str, message: &Message) -> RecipientOutcome {
        let conn_ids = self.conntrack.list(user_id);
        let mut status = RecipientStatus::Ok;

        for conn_id in &conn_ids {
            match self.gateway.deliver(conn_id, message).await {
                Ok(DeliveryOutcome::Delivered) => {
                    self.metrics.inc_deliveries();
                }
                Ok(DeliveryOutcome::Stale) => {
                    // Self-healing: purge the dead conn id, not a failure.
                    self.conntrack.remove(user_id, conn_id);
                    self.metrics.inc_stale_conn_ids();
                    tracing::debug!(
                        test_run_id = %message.test_run_id,
                        user_id,
                        conn_id,
                        "discarded stale gateway connection"
                    );
                }
                Ok(DeliveryOutcome::Failed(code)) => {
                    self.metrics.inc_delivery_failures();
                    tracing::warn!(
                        test_run_id = %message.test_run_id,
                        user_id,
                        conn_id,
                        status = code.as_u16(),
                        "gateway rejected delivery"
                    );
                    status = RecipientStatus::Failed(code);
                }
                Err(e) => {
                    self.metrics.inc_delivery_failures();
                    tracing::warn!(
                        test_run_id = %message.test_run_id,
                        user_id,
                        conn_id,
                        error = %e,
                        "gateway delivery failed"
                    );
                    status = RecipientStatus::Error(e.to_string());
                }
            }
        }

        RecipientOutcome {
            user_id: user_id.to_string(),
            connections_tried: conn_ids.len(),
            status,
        }
    }
}
