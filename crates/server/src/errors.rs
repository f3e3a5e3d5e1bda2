use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiResponse;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Failure rendered as the standard `{status, message, data?}` envelope.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), data: None }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::new(self.status.as_u16(), self.message, self.data);
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::Model(models::errors::ModelError::Validation(_)) => {
                JsonApiError::bad_request(e.to_string())
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Duplicate(ref names) => {
                warn!(code = e.code(), err = %e, "duplicate student rejected");
                let data = serde_json::to_value(names).unwrap_or_default();
                JsonApiError::new(StatusCode::CONFLICT, e.to_string()).with_data(data)
            }
            ServiceError::Db(_) | ServiceError::Model(_) => {
                error!(code = e.code(), err = %e, "student store failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        JsonApiError::bad_request(format!("invalid student data: {}", r.body_text()))
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        JsonApiError::bad_request(format!("invalid search query: {}", r.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        JsonApiError::bad_request(format!("invalid student id: {}", r.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
