use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One end-to-end test message, as posted to the front door and relayed
/// to the gateway verbatim (plus the send timestamp).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub test_run_id: String,
    pub id: String,
    pub sender: String,
    pub recipients: Vec<String>,
    pub data: String,
    pub destination: String,
    /// Set exactly once, at send time. Absent until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trace_data: HashMap<String, String>,
}

impl Message {
    /// The single timestamp-assignment step: consumes the message and
    /// returns a copy with `sent_at` set to now, all other fields
    /// untouched.
    pub fn with_sent_at(self) -> Self {
        Self {
            sent_at: Some(Utc::now()),
            ..self
        }
    }
}
