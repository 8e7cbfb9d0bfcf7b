use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::state::AppState;
use crate::handlers::{attempts, health, metrics, payments};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/api/for4payments", post(payments::create_payment))
        .route("/api/attempts/{ip}", get(attempts::get_attempts))
        .route("/metrics", get(metrics::get_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
