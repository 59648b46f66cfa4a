// GET/POST /api/classify and POST /api/classify/batch.
//
// The URL and limit may come from the query string or a JSON body; the query
// string wins. A limit that isn't a number falls back to the default; valid
// limits are clamped to [1, 50] before the classifier sees them.
// A failed classification is still a JSON result, returned with status 500.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::classify::clamp_limit;
use crate::web::{api_error, AppState};

/// Classify inputs, each read on its own so a bad limit never hides a URL.
#[derive(Debug, Default)]
pub struct ClassifyParams {
    pub url: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default)]
pub struct BatchRequest {
    pub urls: Option<Vec<String>>,
    pub limit: Option<i64>,
}

impl ClassifyParams {
    fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            url: query.get("url").cloned(),
            limit: query.get("limit").and_then(|raw| parse_limit(raw)),
        }
    }

    fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or_default();
        Self {
            url: value.get("url").and_then(Value::as_str).map(str::to_string),
            limit: value.get("limit").and_then(json_limit),
        }
    }
}

impl BatchRequest {
    fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or_default();
        let urls = value.get("urls").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|item| match item.as_str() {
                    Some(url) => url.to_string(),
                    None => item.to_string(),
                })
                .collect()
        });
        Self {
            urls,
            limit: value.get("limit").and_then(json_limit),
        }
    }
}

/// Read a limit from text: integers as-is, decimals truncated, anything
/// else means "use the default".
pub fn parse_limit(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64)
    })
}

fn json_limit(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(raw) => parse_limit(raw),
        _ => None,
    }
}

/// GET /api/classify?url=...&limit=...
pub async fn classify_get(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    run_classify(&state, ClassifyParams::from_query(&query), ClassifyParams::default()).await
}

/// POST /api/classify with an optional JSON body {"url": ..., "limit": ...}.
pub async fn classify_post(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    run_classify(
        &state,
        ClassifyParams::from_query(&query),
        ClassifyParams::from_body(&body),
    )
    .await
}

async fn run_classify(
    state: &AppState,
    query: ClassifyParams,
    body: ClassifyParams,
) -> Response {
    let url = query.url.or(body.url).filter(|u| !u.trim().is_empty());
    let Some(url) = url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "error": "URL parameter is required",
                "usage": {
                    "GET": "/api/classify?url=https://example.com",
                    "POST": "/api/classify with JSON body: {\"url\": \"https://example.com\"}",
                },
            })),
        )
            .into_response();
    };

    let requested = query
        .limit
        .or(body.limit)
        .unwrap_or(state.settings.default_limit as i64);
    let result = state.classifier.classify(&url, clamp_limit(requested)).await;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result)).into_response()
}

/// POST /api/classify/batch with {"urls": [...], "limit": N}.
pub async fn classify_batch(State(state): State<AppState>, body: Bytes) -> Response {
    let request = BatchRequest::from_body(&body);

    let Some(urls) = request.urls else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "error": "URLs array is required",
                "usage": "POST /api/classify/batch with JSON body: {\"urls\": [\"url1\", \"url2\"], \"limit\": 10}",
            })),
        )
            .into_response();
    };

    let max_batch = state.settings.max_batch;
    if urls.len() > max_batch {
        return api_error(
            StatusCode::BAD_REQUEST,
            &format!("Maximum {max_batch} URLs allowed per batch request"),
        );
    }

    let limit = clamp_limit(request.limit.unwrap_or(state.settings.default_limit as i64));
    let batch = state.classifier.classify_batch(&urls, limit, |_| {}).await;
    Json(batch).into_response()
}
