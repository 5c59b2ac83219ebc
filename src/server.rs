use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};

use crate::classifier::Classifier;
use crate::models::{AnalysisRequest, AnalysisResult, ErrorBody, Pattern};

pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub patterns: Vec<Pattern>,
    pub analysis_delay: Duration,
}

/// Every failure leaving the API serializes as `{"error": ...}` so clients
/// only ever see the two documented shapes.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn analysis_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to analyze request".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/patterns", get(patterns_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index_handler() -> impl IntoResponse {
    let html = include_str!("../static/index.html");
    Html(html)
}

async fn patterns_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.patterns.clone())
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ApiError> {
    // The body is parsed by hand so a malformed payload takes the documented
    // failure shape instead of an extractor rejection.
    let request: AnalysisRequest = serde_json::from_slice(&body).map_err(|e| {
        error!("Analysis error: {}", e);
        ApiError::analysis_failed()
    })?;

    let image = request.decoded_image().map_err(|e| {
        error!("Analysis error: {}", e);
        ApiError::analysis_failed()
    })?;

    info!(
        "Received analysis request: queryType={:?}, {} input chars, {} image bytes",
        request.query_type,
        request.input.as_deref().map_or(0, str::len),
        image.as_ref().map_or(0, Vec::len),
    );

    if !state.analysis_delay.is_zero() {
        tokio::time::sleep(state.analysis_delay).await;
    }

    let mut result = state.classifier.classify(&request).map_err(|e| {
        error!("Classification failed: {}", e);
        ApiError::analysis_failed()
    })?;

    // The echo and timestamp are stamped here so the invariants hold no
    // matter which classifier is plugged in.
    result.query_type = request.query_type;
    result.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    Ok(Json(result))
}
