use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::payment::{PaymentResult, UserInput};
use crate::services::atomic_metrics::AtomicMetrics;
use crate::services::attempt_tracker::AttemptTracker;
use crate::services::gateway::{GatewayError, PaymentGateway};
use crate::services::normalizer::{normalize, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub succeeded: u64,
    pub validation_failed: u64,
    pub failed: u64,
    pub tracked_ips: usize,
}

pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    tracker: Arc<AttemptTracker>,
    metrics: AtomicMetrics,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>, tracker: Arc<AttemptTracker>) -> Self {
        Self {
            gateway,
            tracker,
            metrics: AtomicMetrics::new(),
        }
    }

    pub fn tracker(&self) -> &AttemptTracker {
        &self.tracker
    }

    /// Creates the Kit de Segurança PIX charge for `input` and logs the
    /// attempt against `client_ip`.
    pub async fn create_kit_payment(
        &self,
        input: Option<&UserInput>,
        client_ip: &str,
    ) -> Result<PaymentResult, ServiceError> {
        self.metrics.increment_requests();
        info!("Solicitação de pagamento kit recebida de {}", client_ip);

        let normalized = {
            let mut rng = rand::thread_rng();
            normalize(input, &mut rng)
        };
        let request = normalized.map_err(|e| {
            self.metrics.increment_validation_failed();
            warn!("Pagamento recusado na validação: {}", e);
            e
        })?;

        info!("Chamando API de pagamento PIX");
        let result = match self.gateway.create_pix_payment(&request).await {
            Ok(result) => result,
            Err(e) => {
                self.metrics.increment_failed();
                error!("Erro ao processar pagamento kit: {}", e);
                return Err(e.into());
            }
        };

        let decision = self.tracker.record_attempt(client_ip, &result.id, &request);
        if !decision.allowed {
            warn!("Transação {} não permitida: {}", result.id, decision.message);
        }
        if self.tracker.is_banned(client_ip) {
            // reported only; blocking needs a product decision
            warn!("IP {} acima do limite de tentativas, bloqueio não aplicado", client_ip);
        }
        debug!("{}: {}", result.id, decision.message);

        self.metrics.increment_succeeded();
        info!("Pagamento criado com sucesso, ID: {}", result.id);
        Ok(result)
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.metrics.get_requests(),
            succeeded: self.metrics.get_succeeded(),
            validation_failed: self.metrics.get_validation_failed(),
            failed: self.metrics.get_failed(),
            tracked_ips: self.tracker.tracked_ips(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempt::AttemptLimits;
    use crate::models::payment::{PaymentRequest, PaymentStatus};
    use crate::services::attempt_store::InMemoryAttemptStore;
    use crate::services::clock::ManualClock;
    use async_trait::async_trait;

    struct RejectingGateway;

    #[async_trait]
    impl PaymentGateway for RejectingGateway {
        async fn create_pix_payment(
            &self,
            _request: &PaymentRequest,
        ) -> Result<PaymentResult, GatewayError> {
            Err(GatewayError::Rejected("saldo indisponível".to_string()))
        }
    }

    fn service(gateway: Arc<dyn PaymentGateway>) -> PaymentService {
        let clock = Arc::new(ManualClock::at_epoch_secs(1_700_000_000));
        let tracker = AttemptTracker::new(
            Arc::new(InMemoryAttemptStore::new()),
            clock,
            AttemptLimits::default(),
        );
        PaymentService::new(gateway, Arc::new(tracker))
    }

    fn simulated() -> Arc<dyn PaymentGateway> {
        use crate::app::config::SecretKey;
        use crate::services::gateway::SimulatedGateway;

        Arc::new(SimulatedGateway::new(
            SecretKey::TestPlaceholder,
            url::Url::parse("https://api.qrserver.com/v1/create-qr-code/").unwrap(),
            Arc::new(ManualClock::at_epoch_secs(1_700_000_000)),
        ))
    }

    fn maria() -> UserInput {
        UserInput {
            name: Some("Maria Silva".to_string()),
            cpf: Some("111.222.333-44".to_string()),
            phone: None,
        }
    }

    #[tokio::test]
    async fn successful_payment_is_tracked() {
        let service = service(simulated());
        let result = service
            .create_kit_payment(Some(&maria()), "203.0.113.7")
            .await
            .unwrap();

        assert_eq!(result.status, PaymentStatus::Pending);
        assert!(result.id.starts_with("test_"));

        let attempts = service.tracker().recent_attempts("203.0.113.7");
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].transaction_id, result.id);

        let metrics = service.metrics_snapshot();
        assert_eq!(metrics.requests, 1);
        assert_eq!(metrics.succeeded, 1);
        assert_eq!(metrics.tracked_ips, 1);
    }

    #[tokio::test]
    async fn validation_failure_is_not_tracked() {
        let service = service(simulated());
        let input = UserInput {
            cpf: None,
            ..maria()
        };

        let err = service
            .create_kit_payment(Some(&input), "203.0.113.7")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::MissingCpf)));
        assert_eq!(err.to_string(), "CPF do usuário é obrigatório");

        let metrics = service.metrics_snapshot();
        assert_eq!(metrics.validation_failed, 1);
        assert_eq!(metrics.tracked_ips, 0);
    }

    #[tokio::test]
    async fn gateway_failure_is_reported() {
        let service = service(Arc::new(RejectingGateway));
        let err = service
            .create_kit_payment(Some(&maria()), "203.0.113.7")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Gateway(_)));
        assert_eq!(service.metrics_snapshot().failed, 1);
        assert!(service.tracker().recent_attempts("203.0.113.7").is_empty());
    }
}
