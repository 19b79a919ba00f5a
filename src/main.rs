// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::csv_dataset::load_dataset;
use crate::infrastructure::page_renderer::INDEX_TEMPLATE;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // The dashboard cannot serve anything without its dataset
    let dataset = load_dataset(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset.path))?;
    if dataset.is_empty() {
        tracing::warn!("Dataset {} contains no passengers", config.dataset.path);
    }
    tracing::info!(
        "Loaded {} passengers from {} (mean age {:.2})",
        dataset.len(),
        config.dataset.path,
        dataset.mean_age()
    );

    // Create services (application layer)
    let dashboard_service = DashboardService::new(Arc::new(dataset), config.chart.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        template: INDEX_TEMPLATE,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.server.host, config.server.port))?;
    tracing::info!("Starting titanic-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
