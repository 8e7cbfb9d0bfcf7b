//! Maps request and service failures to `{"error": "..."}` JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::services::payment_service::ServiceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Dados de usuário não fornecidos")]
    MissingPayload,

    /// Body that is not a usable JSON object.
    #[error("Erro ao processar pagamento: {0}")]
    InvalidPayload(String),

    /// The message carries the underlying error text verbatim.
    #[error("Erro ao processar pagamento: {0}")]
    Processing(#[from] ServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPayload => StatusCode::BAD_REQUEST,
            AppError::InvalidPayload(_) | AppError::Processing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
