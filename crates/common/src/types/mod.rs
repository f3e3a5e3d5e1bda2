use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Response envelope used by every `/api/std` endpoint.
///
/// `status` mirrors the HTTP status code so clients that only see the body
/// still know the outcome. `data` is omitted when there is nothing to return.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self { status, message: message.into(), data }
    }

    /// 200 with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(200, message, Some(data))
    }

    /// 201 with the created payload.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(201, message, Some(data))
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}
