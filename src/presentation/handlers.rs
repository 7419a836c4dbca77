// HTTP request handlers
use crate::application::error::GraphsError;
use crate::application::graphs::Graphs;
use crate::domain::monitored_object::MonitoredObject;
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Graphs of a single host
pub async fn host_graphs(
    Path(host): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    graphs_response(&MonitoredObject::host(host), &params, &headers, &state).await
}

/// Graphs of a single service
pub async fn service_graphs(
    Path((host, service)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    graphs_response(
        &MonitoredObject::service(host, service),
        &params,
        &headers,
        &state,
    )
    .await
}

/// Graphs of any object described by `type`, `name` and `host` query parameters
pub async fn object_graphs(
    Query(object): Query<MonitoredObject>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    graphs_response(&object, &params, &headers, &state).await
}

async fn graphs_response(
    object: &MonitoredObject,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    state: &AppState,
) -> Response {
    let html = match render_graphs(object, params, state).await {
        Ok(html) => html,
        Err(e) => return e.into_response(),
    };

    match html_response(StatusCode::OK, html, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

async fn render_graphs(
    object: &MonitoredObject,
    params: &HashMap<String, String>,
    state: &AppState,
) -> Result<String, GraphsError> {
    let mut graphs = Graphs::for_object(object)?;
    graphs.set_compact(is_compact(params));
    graphs
        .handle_request(params, state.template_store.as_ref(), &state.graphite)
        .await?;

    tracing::debug!(
        templates = graphs.templates().count(),
        width = %graphs.params().width,
        height = %graphs.params().height,
        compact = graphs.compact(),
        "Rendering graphs for {:?}",
        graphs.target()
    );
    Ok(graphs.render())
}

fn is_compact(params: &HashMap<String, String>) -> bool {
    params
        .get("compact")
        .is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
}
