//! Response envelope produced by [`super::ApiHandler`].

use serde::Serialize;
use serde_json::{Value, json};

/// Message returned for any storage failure; the detail is only logged.
pub const STORAGE_FAILURE_MESSAGE: &str = "internal storage error";

/// Status code and JSON body for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body.
    pub body: Value,
}

impl ApiResponse {
    /// Successful response with an arbitrary body.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// `{"id": ...}` for a created entity.
    #[must_use]
    pub fn created(id: impl Serialize) -> Self {
        Self::ok(json!({ "id": id }))
    }

    /// `{"success": true}`.
    #[must_use]
    pub fn success() -> Self {
        Self::ok(json!({ "success": true }))
    }

    /// `{"error": message}` with the given status.
    #[must_use]
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// `400` with a client-facing message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    /// `404` with a client-facing message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(404, message)
    }

    /// `500` with the generic storage message.
    #[must_use]
    pub fn storage_failure() -> Self {
        Self::error(500, STORAGE_FAILURE_MESSAGE)
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
