//! API error responses

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use council_domain::DomainError;
use serde_json::json;
use thiserror::Error;

/// Seconds a rate-limited client is told to wait
pub const RETRY_AFTER_SECS: u64 = 60;

/// Errors returned by the HTTP API as JSON bodies
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Rate limit exceeded. Try again in 60 seconds.")]
    RateLimited,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::Validation(e) => Some(e.field()),
            ApiError::MalformedBody(_) => Some("body"),
            ApiError::RateLimited => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.field() {
            Some(field) => json!({"error": self.to_string(), "field": field}),
            None => json!({"error": self.to_string()}),
        };

        let mut response = (self.status(), Json(body)).into_response();
        if matches!(self, ApiError::RateLimited) {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECS));
        }
        response
    }
}
