use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::app::config::SecretKey;
use crate::models::payment::{PaymentRequest, PaymentResult, PaymentStatus};
use crate::services::clock::Clock;
use crate::utils::masking::{mask_cpf, mask_secret};

/// Static payload returned by the development gateway. It does not encode the
/// request; it is not a real charge.
pub const PLACEHOLDER_PIX_CODE: &str = "00020126580014BR.GOV.BCB.PIX0136f5f04a2d-ecec-4072-955c-9e1d44c5060a0224Pagamento Kit Seguranca5204000053039865406107.805802BR5909ShopeeKit6009Sao Paulo62100506codigo6304E57B";

pub const QR_CODE_SIZE: &str = "200x200";

#[derive(Debug, Error)]
pub enum GatewayError {
    // O gateway simulado nunca recusa; só gateways de teste constroem esta variante
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("gateway recusou a cobrança: {0}")]
    Rejected(String),
}

/// Anything able to open a PIX charge for a normalized request.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_pix_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, GatewayError>;
}

/// Development gateway: never leaves the process and always answers `pending`.
pub struct SimulatedGateway {
    secret_key: SecretKey,
    qr_code_base_url: Url,
    clock: Arc<dyn Clock>,
}

impl SimulatedGateway {
    pub fn new(secret_key: SecretKey, qr_code_base_url: Url, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret_key,
            qr_code_base_url,
            clock,
        }
    }

    fn qr_code_url(&self, pix_code: &str) -> String {
        let mut url = self.qr_code_base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("size", QR_CODE_SIZE)
            .append_pair("data", pix_code);
        url.into()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn create_pix_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, GatewayError> {
        debug!(
            "Utilizando token de autenticação: {}",
            mask_secret(self.secret_key.as_str())
        );
        if self.secret_key.is_placeholder() {
            warn!("Simulando transação PIX com chave de teste");
        }
        info!(
            "Dados recebidos para pagamento: {} <{}> CPF {} telefone {}",
            request.name,
            request.email,
            mask_cpf(&request.cpf),
            request.phone
        );
        if !request.has_valid_cpf() {
            warn!("CPF malformado repassado ao gateway: {}", mask_cpf(&request.cpf));
        }
        info!("Simulando transação PIX - modo de desenvolvimento");

        let created_at = self.clock.now();
        let id = format!("test_{}", created_at.timestamp());
        info!("Transação simulada criada, ID: {}", id);

        Ok(PaymentResult {
            id,
            pix_code: PLACEHOLDER_PIX_CODE.to_string(),
            pix_qr_code: self.qr_code_url(PLACEHOLDER_PIX_CODE),
            status: PaymentStatus::Pending,
            created_at,
        })
    }
}
