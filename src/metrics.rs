use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Process-wide counters for the message path. Cheap atomics, exposed as
/// a JSON snapshot via `GET /api/v1/stats`.
#[derive(Default)]
pub struct Metrics {
    message_requests: AtomicU64,
    deliveries: AtomicU64,
    delivery_failures: AtomicU64,
    stale_conn_ids: AtomicU64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub message_requests: u64,
    pub deliveries: u64,
    pub delivery_failures: u64,
    pub stale_conn_ids: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// One inbound message-send request accepted by the front door.
    pub fn inc_message_requests(&self) {
        self.message_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// One message accepted by the gateway for one connection.
    pub fn inc_deliveries(&self) {
        self.deliveries.fetch_add(1, Ordering::Relaxed);
    }

    /// One delivery attempt that failed with a non-stale error.
    pub fn inc_delivery_failures(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// One connection id the gateway reported as no longer live.
    pub fn inc_stale_conn_ids(&self) {
        self.stale_conn_ids.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            message_requests: self.message_requests.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            stale_conn_ids: self.stale_conn_ids.load(Ordering::Relaxed),
        }
    }
}
