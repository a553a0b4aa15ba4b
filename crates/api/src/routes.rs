use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use insight_models::{EnrichedMatch, InsightError, MatchRecord};
use insight_services::{EnrichmentLimits, EnrichmentService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::operations::{is_param_error, Operation, OperationSpec};
use crate::slug::extract_slug;

#[derive(Clone)]
pub struct AppState {
    pub enrichment: Arc<EnrichmentService>,
    pub defaults: EnrichmentLimits,
    pub max_limit: usize,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(enrichment: Arc<EnrichmentService>, defaults: EnrichmentLimits, max_limit: usize) -> Self {
        Self {
            enrichment,
            defaults,
            max_limit,
            started_at: Instant::now(),
        }
    }

    fn limits(&self, params: &LimitParams) -> EnrichmentLimits {
        EnrichmentLimits {
            form_limit: params.form_limit.unwrap_or(self.defaults.form_limit),
            h2h_limit: params.h2h_limit.unwrap_or(self.defaults.h2h_limit),
        }
        .clamped(self.max_limit)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub form_limit: Option<usize>,
    pub h2h_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UrlParams {
    pub url: String,
    pub form_limit: Option<usize>,
    pub h2h_limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health and status
        .route("/ping", get(ping))
        .route("/health", get(health_check))

        // Match data
        .route("/api/v1/matches/:identifier", get(get_match))
        .route("/api/v1/matches/:identifier/enriched", get(get_enriched_match))
        .route("/api/v1/enriched", get(get_enriched_by_url))

        // Whitelisted passthrough
        .route("/api/v1/operations", get(list_operations))
        .route("/api/v1/call/:operation", post(call_operation))
}

/// Routes with request tracing and permissive CORS, bound to `state`.
pub fn create_app(state: AppState) -> Router {
    create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

// Raw match record as the provider returned it
async fn get_match(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MatchRecord>>, ApiError> {
    let identifier = extract_slug(&identifier)
        .ok_or_else(|| ApiError::BadRequest("Empty match identifier".to_string()))?;

    let record = state
        .enrichment
        .provider()
        .fetch_match_details(&identifier)
        .await
        .map_err(InsightError::from)?;

    Ok(Json(ApiResponse::ok(record)))
}

async fn get_enriched_match(
    Path(identifier): Path<String>,
    Query(params): Query<LimitParams>,
    State(state): State<AppState>,
) -> Result<Json<EnrichedMatch>, ApiError> {
    let identifier = extract_slug(&identifier)
        .ok_or_else(|| ApiError::BadRequest("Empty match identifier".to_string()))?;

    let enriched = state.enrichment.enrich(&identifier, state.limits(&params)).await?;
    Ok(Json(enriched))
}

async fn get_enriched_by_url(
    Query(params): Query<UrlParams>,
    State(state): State<AppState>,
) -> Result<Json<EnrichedMatch>, ApiError> {
    let identifier = extract_slug(&params.url)
        .ok_or_else(|| ApiError::BadRequest(format!("No match slug in '{}'", params.url)))?;

    let limits = state.limits(&LimitParams {
        form_limit: params.form_limit,
        h2h_limit: params.h2h_limit,
    });
    let enriched = state.enrichment.enrich(&identifier, limits).await?;
    Ok(Json(enriched))
}

async fn list_operations() -> Json<ApiResponse<Vec<OperationSpec>>> {
    Json(ApiResponse::ok(Operation::ALL.into_iter().map(Operation::spec).collect()))
}

async fn call_operation(
    Path(operation): Path<String>,
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let operation: Operation = operation
        .parse()
        .map_err(|e: crate::operations::UnknownOperation| ApiError::BadRequest(e.to_string()))?;

    let params = body.map_or_else(|| serde_json::json!({}), |Json(value)| value);

    let result = operation
        .call(&state.enrichment, params, state.defaults, state.max_limit)
        .await
        .map_err(|e| {
            if is_param_error(&e) {
                ApiError::BadRequest(format!("Invalid parameters for {}: {}", operation.name(), e))
            } else {
                ApiError::Insight(e)
            }
        })?;

    Ok(Json(ApiResponse::ok(result)))
}
