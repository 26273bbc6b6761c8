//! HTTP surface: router assembly and request handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::classifier::SentimentClassifier;
use crate::error::AppError;
use crate::miner;
use crate::models::{AnalysisRequest, AnalyzeResponse, MineResponse};

/// Shared handler state: the classifier capability behind its trait seam.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn SentimentClassifier>,
}

/// Assembles the application router. CORS is fully open: the demo front-end
/// is served from a different origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/mine", post(mine))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// `POST /analyze` — classify a single text and return the raw payload.
///
/// Remote failures are not recovered here: the whole request fails with the
/// remote diagnostic under `details`.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.text.is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let sentiment = state.classifier.classify(&request.text).await?;
    Ok(Json(AnalyzeResponse { sentiment }))
}

/// `POST /mine` — classify a blob line by line and aggregate.
async fn mine(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<MineResponse>, AppError> {
    if request.text.is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }

    info!("Mining {} bytes of text", request.text.len());
    let response = miner::mine(state.classifier.as_ref(), &request.text).await;
    Ok(Json(response))
}
