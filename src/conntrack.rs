use dashmap::DashMap;

/// Tracks which live gateway connections each user currently holds.
///
/// Plain in-memory mapping: no eviction, no TTL, no persistence. Entries
/// are created on first add and never destroyed, so a user who dropped all
/// connections keeps an empty entry. DashMap's per-key locking makes each
/// call atomic with respect to concurrent dispatches.
#[derive(Default)]
pub struct ConnectionTracker {
    conns: DashMap<String, Vec<String>>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self {
            conns: DashMap::new(),
        }
    }

    /// Append a connection id to the user's entry, creating it if absent.
    /// No duplicate check: registering the same id twice lists it twice.
    pub fn add(&self, user_id: &str, conn_id: &str) {
        self.conns
            .entry(user_id.to_string())
            .or_default()
            .push(conn_id.to_string());
    }

    /// Snapshot of the user's connection ids in insertion order.
    /// Empty vec if the user has no entry. Never fails.
    pub fn list(&self, user_id: &str) -> Vec<String> {
        self.conns
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Remove all occurrences of `conn_id` from the user's entry.
    ///
    /// Returns whether the user had an entry at all, not whether anything
    /// was actually removed.
    pub fn remove(&self, user_id: &str, conn_id: &str) -> bool {
        match self.conns.get_mut(user_id) {
            Some(mut entry) => {
                entry.value_mut().retain(|id| id != conn_id);
                true
            }
            None => false,
        }
    }
}
