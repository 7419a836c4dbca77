// Route table for the graphs service
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, host_graphs, object_graphs, service_graphs};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/graphs", get(object_graphs))
        .route("/graphs/host/:host", get(host_graphs))
        .route("/graphs/service/:host/:service", get(service_graphs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
