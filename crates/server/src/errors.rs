use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::Binding;

pub const ITEM_NOT_FOUND: &str = "Item not found";

/// JSON error body with a single field, e.g. `{"message": "Item not found"}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub key: &'static str,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, key: &'static str, message: impl Into<String>) -> Self {
        Self { status, key, message: message.into() }
    }

    pub fn not_found(binding: Binding) -> Self {
        common::metrics::record_not_found(binding.name());
        Self::new(StatusCode::NOT_FOUND, binding.error_key(), ITEM_NOT_FOUND)
    }

    pub fn unprocessable(binding: Binding, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, binding.error_key(), message)
    }

    pub fn from_service(binding: Binding, e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(binding),
            other => {
                error!(binding = binding.name(), err = %other, "item operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, binding.error_key(), "Internal Server Error")
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::Map::new();
        body.insert(self.key.to_string(), serde_json::Value::String(self.message));
        (self.status, Json(serde_json::Value::Object(body))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
