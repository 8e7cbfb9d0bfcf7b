use axum::{
    body::Bytes,
    extract::State,
    response::Json,
};
use serde_json::Value;
use tracing::{error, info};

use crate::app::error::AppError;
use crate::app::state::AppState;
use crate::handlers::client_ip::ClientIp;
use crate::models::payment::{json_kind, PaymentResult, UserInput};

pub async fn create_payment(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    body: Bytes,
) -> Result<Json<PaymentResult>, AppError> {
    let input = parse_user_input(&body)?;

    match state.payments.create_kit_payment(Some(&input), &client_ip).await {
        Ok(result) => {
            info!("Pagamento {} retornado para {}", result.id, client_ip);
            Ok(Json(result))
        }
        Err(e) => {
            error!("Erro ao processar pagamento: {}", e);
            Err(e.into())
        }
    }
}

/// Empty bodies and JSON "falsy" values (`null`, `{}`, `[]`, `""`, `0`,
/// `false`) mean no user data was sent. Anything else must be an object.
fn parse_user_input(body: &[u8]) -> Result<UserInput, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::MissingPayload);
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        error!("Invalid payment request: {}", e);
        AppError::InvalidPayload(e.to_string())
    })?;

    if is_falsy(&value) {
        return Err(AppError::MissingPayload);
    }
    if !value.is_object() {
        let message = format!("esperado objeto JSON, recebido {}", json_kind(&value));
        error!("Invalid payment request: {}", message);
        return Err(AppError::InvalidPayload(message));
    }

    serde_json::from_value(value).map_err(|e| {
        error!("Invalid payment request: {}", e);
        AppError::InvalidPayload(e.to_string())
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
