use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use insight_models::{InsightError, UpstreamError};

use crate::routes::ApiResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Insight(InsightError),
}

impl From<InsightError> for ApiError {
    fn from(error: InsightError) -> Self {
        ApiError::Insight(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Insight(InsightError::MissingData { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Insight(InsightError::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Insight(InsightError::Upstream(upstream)) => match upstream {
                UpstreamError::Status { status: 404, .. } => StatusCode::NOT_FOUND,
                UpstreamError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                UpstreamError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                UpstreamError::Transport { .. }
                | UpstreamError::Status { .. }
                | UpstreamError::Decode { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Insight(error) => error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("❌ {} {}", status, message);
        } else {
            tracing::warn!("⚠️ {} {}", status, message);
        }

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message),
        };
        (status, Json(body)).into_response()
    }
}
