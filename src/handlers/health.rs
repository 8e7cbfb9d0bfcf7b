use axum::{extract::State, response::Json};
use chrono::SecondsFormat;

use crate::app::state::AppState;

pub const BANNER: &str =
    "For4Payments API está funcionando. Use POST /api/for4payments para processar pagamentos.";

pub async fn index() -> &'static str {
    BANNER
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "api_configured": state.api_configured,
        "timestamp": state.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
