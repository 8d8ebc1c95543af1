use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ra_core::{Error, DISCLAIMER};
use ra_scraper::STAGES;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    match state.manager.analyze(&request.url).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(Error::InvalidUrl(message)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        Err(e) => {
            tracing::error!("Analysis of {} failed: {}", request.url, e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn about() -> Json<Value> {
    let stages: Vec<Value> = STAGES
        .iter()
        .map(|(title, description)| json!({ "title": title, "description": description }))
        .collect();
    Json(json!({ "stages": stages, "disclaimer": DISCLAIMER }))
}
