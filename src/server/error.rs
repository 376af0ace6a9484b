//! Error-to-HTTP response conversion.
//!
//! Route handlers return `Result<T, AppError>`; any [`requestarr_core::Error`]
//! converts with `?`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use requestarr_core::Error;
use serde_json::{json, Value};

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }

    /// The `error` field of the response body.
    ///
    /// Provider rejections carry the provider's own body, as JSON when it
    /// parses and as a plain string otherwise.
    fn error_value(&self) -> Value {
        match &self.inner {
            Error::ProviderCallFailed { body, .. } => serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(body.clone())),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(Error::validation(format!(
            "Invalid JSON body: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(Error::validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                provider = ?self.inner.kind(),
                request_id = ?self.request_id,
                "Server error in API handler"
            );
        }

        let body = json!({
            "error": self.error_value(),
            "code": self.inner.code(),
            "request_id": self.request_id,
        });

        (status, axum::Json(body)).into_response()
    }
}
