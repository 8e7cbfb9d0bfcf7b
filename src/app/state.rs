use std::sync::Arc;
use tracing::info;

use crate::app::config::{ConfigError, Config};
use crate::services::attempt_store::InMemoryAttemptStore;
use crate::services::attempt_tracker::AttemptTracker;
use crate::services::clock::{Clock, SystemClock};
use crate::services::gateway::SimulatedGateway;
use crate::services::payment_service::PaymentService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
    pub clock: Arc<dyn Clock>,
    /// True only when a real secret key was configured.
    pub api_configured: bool,
}

impl AppState {
    pub fn new(payments: Arc<PaymentService>, clock: Arc<dyn Clock>, api_configured: bool) -> Self {
        Self {
            payments,
            clock,
            api_configured,
        }
    }

    /// Wires the in-memory attempt store and the simulated gateway.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let secret_key = config.resolve_secret_key()?;
        let api_configured = !secret_key.is_placeholder();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let tracker = AttemptTracker::new(
            Arc::new(InMemoryAttemptStore::new()),
            clock.clone(),
            config.attempt_limits(),
        );
        let gateway = SimulatedGateway::new(secret_key, config.qr_code_base_url()?, clock.clone());

        info!(
            "Limite de tentativas: {} por {}s",
            config.max_attempts, config.attempt_window_secs
        );

        let payments = PaymentService::new(Arc::new(gateway), Arc::new(tracker));
        Ok(Self::new(Arc::new(payments), clock, api_configured))
    }
}
