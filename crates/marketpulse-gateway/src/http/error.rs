//! HTTP mapping for `MarketError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use marketpulse_core::error::MarketError;

/// Handler error: a `MarketError` rendered as `{"error": CODE, "message": text}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub MarketError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            MarketError::BadRequest(_) | MarketError::UnsupportedVersion => StatusCode::BAD_REQUEST,
            MarketError::AlreadyRunning => StatusCode::CONFLICT,
            MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
