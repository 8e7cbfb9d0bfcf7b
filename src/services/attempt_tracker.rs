use std::sync::Arc;
use tracing::{info, warn};

use crate::models::attempt::{AttemptDecision, AttemptLimits, AttemptRecord, BanStatus};
use crate::models::payment::PaymentRequest;
use crate::services::attempt_store::AttemptStore;
use crate::services::clock::Clock;

/// Records transaction attempts per client IP and answers ban queries over a
/// sliding window.
pub struct AttemptTracker {
    store: Arc<dyn AttemptStore>,
    clock: Arc<dyn Clock>,
    limits: AttemptLimits,
}

impl AttemptTracker {
    pub fn new(store: Arc<dyn AttemptStore>, clock: Arc<dyn Clock>, limits: AttemptLimits) -> Self {
        Self {
            store,
            clock,
            limits,
        }
    }

    /// Appends the attempt to `client_ip`'s log.
    ///
    /// Always allows: the ban state from [`Self::is_banned`] is not enforced here.
    pub fn record_attempt(
        &self,
        client_ip: &str,
        transaction_id: &str,
        payment: &PaymentRequest,
    ) -> AttemptDecision {
        self.store.append(
            client_ip,
            AttemptRecord {
                timestamp: self.clock.epoch_secs(),
                transaction_id: transaction_id.to_string(),
                amount_cents: payment.amount_cents,
            },
        );
        info!("Tentativa de transação de {}: ID {}", client_ip, transaction_id);

        AttemptDecision::allowed()
    }

    /// Attempts from `client_ip` inside the window. Prunes older ones.
    pub fn recent_attempts(&self, client_ip: &str) -> Vec<AttemptRecord> {
        self.store.query_window(
            client_ip,
            self.clock.epoch_secs(),
            self.limits.window_secs as f64,
        )
    }

    pub fn ban_status(&self, client_ip: &str) -> BanStatus {
        let recent_attempts = self.recent_attempts(client_ip).len();
        let banned = recent_attempts >= self.limits.max_attempts;
        if banned {
            warn!("IP {} excedeu o limite de tentativas de transação", client_ip);
        }

        BanStatus {
            ip: client_ip.to_string(),
            banned,
            recent_attempts,
            max_attempts: self.limits.max_attempts,
            window_secs: self.limits.window_secs,
        }
    }

    /// True when `max_attempts` or more attempts fall inside the window.
    pub fn is_banned(&self, client_ip: &str) -> bool {
        self.ban_status(client_ip).banned
    }

    pub fn tracked_ips(&self) -> usize {
        self.store.tracked_ips()
    }
}
