use axum::{extract::State, response::Json};

use crate::app::state::AppState;
use crate::services::payment_service::MetricsSnapshot;

pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.payments.metrics_snapshot())
}
