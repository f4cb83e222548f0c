//! HTTP endpoints.
//!
//! - `/`        : landing page (HTML)
//! - `/health`  : liveness + version (JSON)
//! - `/info`    : host/build/environment info (JSON)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use beacon_core::metrics::TEXT_CONTENT_TYPE;

use crate::app_state::AppState;
use crate::host;

mod page;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub hostname: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub hostname: String,
    pub runtime_version: String,
    pub library_version: String,
    pub environment: String,
    pub timestamp: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render_index(&page::IndexView {
        hostname: host::hostname(),
        timestamp: host::now_iso8601(),
        environment: state.cfg().app.environment.clone(),
        runtime_version: host::runtime_version(),
        version: state.cfg().app.version.clone(),
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: host::now_iso8601(),
        hostname: host::hostname(),
        version: state.cfg().app.version.clone(),
    })
}

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        hostname: host::hostname(),
        runtime_version: host::runtime_version(),
        library_version: host::library_version(),
        environment: state.cfg().app.environment.clone(),
        timestamp: host::now_iso8601(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
