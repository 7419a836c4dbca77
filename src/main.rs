// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::graphite_query::GraphiteWeb;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::graphite_http_client::GraphiteHttpClient;
use crate::infrastructure::template_files::FileTemplateStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_app_config().context("Failed to load config/graphs")?;

    // Create adapters (infrastructure layer)
    let client = Arc::new(GraphiteHttpClient::new(&config.graphite)?);
    let template_store = Arc::new(FileTemplateStore::new(config.templates.path.clone()));

    // Create application state
    let state = Arc::new(AppState {
        template_store,
        graphite: GraphiteWeb::new(client, config.graphite.render_base()),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        %addr,
        graphite = %config.graphite.url,
        templates = %config.templates.path.display(),
        "Starting graphite-graphs service"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
