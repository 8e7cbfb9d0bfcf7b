use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use crate::app::state::AppState;
use crate::models::attempt::BanStatus;

/// Ban status for `ip`. Reading it prunes that IP's stale attempts; nothing
/// here blocks payments.
pub async fn get_attempts(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Json<BanStatus> {
    let status = state.payments.tracker().ban_status(&ip);
    info!(
        "Consulta de bloqueio para {}: {} tentativas recentes",
        status.ip, status.recent_attempts
    );
    Json(status)
}
