use dashmap::DashMap;

use crate::models::attempt::AttemptRecord;

/// Per-IP log of transaction attempts.
///
/// Implementations must make `append` and the prune inside `query_window`
/// atomic per IP; requests for the same client can arrive concurrently.
pub trait AttemptStore: Send + Sync {
    fn append(&self, ip: &str, record: AttemptRecord);

    /// Drops the IP's records that are `window_secs` or more older than `now`
    /// and returns what is left, oldest first.
    fn query_window(&self, ip: &str, now: f64, window_secs: f64) -> Vec<AttemptRecord>;

    fn tracked_ips(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryAttemptStore {
    attempts: DashMap<String, Vec<AttemptRecord>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptStore for InMemoryAttemptStore {
    fn append(&self, ip: &str, record: AttemptRecord) {
        self.attempts
            .entry(ip.to_string())
            .or_default()
            .push(record);
    }

    fn query_window(&self, ip: &str, now: f64, window_secs: f64) -> Vec<AttemptRecord> {
        let recent = match self.attempts.get_mut(ip) {
            Some(mut entry) => {
                entry.retain(|attempt| now - attempt.timestamp < window_secs);
                entry.clone()
            }
            None => return Vec::new(),
        };

        if recent.is_empty() {
            self.attempts.remove_if(ip, |_, records| records.is_empty());
        }
        recent
    }

    fn tracked_ips(&self) -> usize {
        self.attempts.len()
    }
}
