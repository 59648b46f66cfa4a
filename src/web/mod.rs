// Web server: Axum-based JSON API for page classification.
//
// All routes live under /api and speak JSON. The server holds one Classifier
// (HTTP page source + density extractor) shared by every request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::classify::Classifier;
use crate::config::Config;
use crate::page::fetcher::HttpPageSource;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Classifier,
    pub settings: Arc<ApiSettings>,
}

/// Request-level limits the API enforces before classifying.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub max_batch: usize,
    pub default_limit: usize,
}

impl AppState {
    pub fn new(classifier: Classifier, settings: ApiSettings) -> Self {
        Self {
            classifier,
            settings: Arc::new(settings),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let extractor = config.build_extractor()?;
    let source = HttpPageSource::new(&config.user_agent, config.fetch_timeout)?;
    let classifier = Classifier::new(Arc::new(source), Arc::new(extractor))
        .with_batch_delay(config.batch_delay);

    let state = AppState::new(
        classifier,
        ApiSettings {
            max_batch: config.max_batch,
            default_limit: config.default_limit,
        },
    );

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Page classification API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/classify",
            get(handlers::classify::classify_get).post(handlers::classify::classify_post),
        )
        .route("/api/classify/batch", post(handlers::classify::classify_batch))
        .route("/api/classify/help", get(handlers::help::help))
        .route("/api/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check, always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "OK",
            "timestamp": Utc::now().timestamp(),
        })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "success": false, "error": message })),
    )
        .into_response()
}
