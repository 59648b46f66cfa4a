// GET /api/classify/help: self-describing API documentation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::classify::MAX_TOPIC_LIMIT;
use crate::web::AppState;

pub async fn help(State(state): State<AppState>) -> impl IntoResponse {
    let default_limit = state.settings.default_limit;
    let max_batch = state.settings.max_batch;

    Json(serde_json::json!({
        "api_name": "Page Classification API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Classifies web pages and returns relevant topics using weighted density analysis",
        "endpoints": [
            {
                "method": "GET/POST",
                "path": "/api/classify",
                "description": "Classify a single URL",
                "parameters": {
                    "url": "Required. The URL to classify",
                    "limit": format!("Optional. Number of topics to return (default: {default_limit}, max: {MAX_TOPIC_LIMIT})"),
                },
                "examples": [
                    "GET /api/classify?url=https://example.com&limit=10",
                    "POST /api/classify with body: {\"url\": \"https://example.com\", \"limit\": 10}",
                ],
            },
            {
                "method": "POST",
                "path": "/api/classify/batch",
                "description": format!("Classify up to {max_batch} URLs in one request"),
                "parameters": {
                    "urls": "Required. Array of URLs to classify",
                    "limit": format!("Optional. Number of topics per URL (default: {default_limit})"),
                },
                "example": "POST /api/classify/batch with body: {\"urls\": [\"url1\", \"url2\"], \"limit\": 10}",
            },
            {
                "method": "GET",
                "path": "/api/health",
                "description": "Liveness check",
            },
        ],
        "response_format": {
            "success": "Boolean indicating if classification succeeded",
            "url": "The URL that was classified",
            "page_title": "The page title",
            "topics": "Array of topic strings",
            "topics_detailed": "Array of topics with scores and frequencies",
            "metadata": "Processing time and statistics",
        },
    }))
}
