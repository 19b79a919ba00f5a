// HTTP request handlers
use crate::domain::passenger_class::PassengerClass;
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::infrastructure::page_renderer::render_dashboard_page;
use crate::presentation::app_state::AppState;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ClassSelection {
    #[serde(rename = "dropdown-select")]
    pub selection: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Initial page load; the class may also arrive in the query string.
/// An unreadable query string is treated as no selection.
pub async fn dashboard_page(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    query: Option<Query<ClassSelection>>,
) -> Response {
    let selection = query.map(|Query(selection)| selection).unwrap_or_default();
    render_page(&state, &selection, accepts_brotli(&headers)).await
}

/// Dropdown submission. A missing or unreadable form is treated as no selection.
pub async fn select_class(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    form: Option<Form<ClassSelection>>,
) -> Response {
    let selection = form.map(|Form(selection)| selection).unwrap_or_default();
    render_page(&state, &selection, accepts_brotli(&headers)).await
}

/// Anything other than 1, 2 or 3 falls back to first class.
pub fn resolve_class(selection: Option<&str>) -> PassengerClass {
    match selection.map(str::trim) {
        None | Some("") => {
            tracing::debug!("No class selected, defaulting to {}", PassengerClass::default());
            PassengerClass::default()
        }
        Some(raw) => PassengerClass::parse(raw).unwrap_or_else(|| {
            tracing::warn!("Invalid class selection {:?}, defaulting to {}", raw, PassengerClass::default());
            PassengerClass::default()
        }),
    }
}

async fn render_page(state: &AppState, selection: &ClassSelection, compress: bool) -> Response {
    let class = resolve_class(selection.selection.as_deref());
    let dashboard = state.dashboard_service.build_dashboard(class);

    let page = match render_dashboard_page(&dashboard, state.template) {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Error rendering dashboard for class {}: {}", class, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match html_response(page, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
