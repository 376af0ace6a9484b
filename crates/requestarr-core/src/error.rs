//! Unified error type for requestarr.
//!
//! Every failure in the normalization layer funnels into [`Error`], which
//! carries enough context for the HTTP boundary to pick a status code via
//! [`Error::http_status`].

use crate::MediaKind;

/// Unified error type covering all failure modes in requestarr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required caller-supplied field was absent or empty.
    #[error("{0}")]
    MissingField(String),

    /// Caller input was present but unusable (bad kind, bad page, bad id).
    #[error("{0}")]
    Validation(String),

    /// The provider reported no root folders to add the item under.
    #[error("No valid root folder found in {}", .kind.provider_name())]
    NoRootFolder {
        /// The kind whose provider has no root folder.
        kind: MediaKind,
    },

    /// The provider answered with a non-success status.
    #[error("{} returned HTTP {status}: {body}", .kind.provider_name())]
    ProviderCallFailed {
        /// The kind whose provider failed.
        kind: MediaKind,
        /// HTTP status code returned by the provider.
        status: u16,
        /// Raw response body, passed through to the caller.
        body: String,
    },

    /// The provider could not be reached (connect failure, timeout).
    #[error("{} is unreachable: {message}", .kind.provider_name())]
    ProviderUnreachable {
        /// The kind whose provider is unreachable.
        kind: MediaKind,
        /// Transport-level error description.
        message: String,
    },

    /// The provider answered 2xx with a body we could not decode.
    #[error("{} returned an invalid response: {message}", .kind.provider_name())]
    ProviderInvalidResponse {
        /// The kind whose provider misbehaved.
        kind: MediaKind,
        /// Decode error description.
        message: String,
    },

    /// No enabled provider is configured for the requested kind.
    #[error("{} is not configured", .0.provider_name())]
    ProviderNotConfigured(MediaKind),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    ///
    /// Provider call failures pass the provider's own status through; a
    /// status outside the valid range falls back to 502.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::MissingField(_) => 400,
            Error::Validation(_) => 400,
            Error::NoRootFolder { .. } => 500,
            Error::ProviderCallFailed { status, .. } => {
                if (100..=599).contains(status) {
                    *status
                } else {
                    502
                }
            }
            Error::ProviderUnreachable { .. } => 502,
            Error::ProviderInvalidResponse { .. } => 502,
            Error::ProviderNotConfigured(_) => 503,
            Error::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingField(_) => "missing_field",
            Error::Validation(_) => "validation_error",
            Error::NoRootFolder { .. } => "no_root_folder",
            Error::ProviderCallFailed { .. } => "provider_error",
            Error::ProviderUnreachable { .. } => "provider_unreachable",
            Error::ProviderInvalidResponse { .. } => "provider_invalid_response",
            Error::ProviderNotConfigured(_) => "provider_not_configured",
            Error::Internal(_) => "internal_error",
        }
    }

    /// The media kind this error concerns, if it came from a provider.
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            Error::NoRootFolder { kind }
            | Error::ProviderCallFailed { kind, .. }
            | Error::ProviderUnreachable { kind, .. }
            | Error::ProviderInvalidResponse { kind, .. } => Some(*kind),
            Error::ProviderNotConfigured(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Convenience constructor for [`Error::MissingField`].
    pub fn missing<S: Into<String>>(msg: S) -> Self {
        Self::MissingField(msg.into())
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Convenience constructor for [`Error::ProviderUnreachable`].
    pub fn unreachable(kind: MediaKind, message: impl Into<String>) -> Self {
        Self::ProviderUnreachable {
            kind,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ProviderInvalidResponse`].
    pub fn invalid_response(kind: MediaKind, message: impl Into<String>) -> Self {
        Self::ProviderInvalidResponse {
            kind,
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = Error::missing("Missing query or type");
        assert_eq!(err.to_string(), "Missing query or type");
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.code(), "missing_field");
    }

    #[test]
    fn validation_display() {
        let err = Error::validation("page must be a positive integer");
        assert_eq!(err.to_string(), "page must be a positive integer");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn no_root_folder_is_kind_specific() {
        let tv = Error::NoRootFolder { kind: MediaKind::Tv };
        let movie = Error::NoRootFolder {
            kind: MediaKind::Movie,
        };
        let music = Error::NoRootFolder {
            kind: MediaKind::Music,
        };
        assert_eq!(tv.to_string(), "No valid root folder found in Sonarr");
        assert_eq!(movie.to_string(), "No valid root folder found in Radarr");
        assert_eq!(music.to_string(), "No valid root folder found in Lidarr");
        assert_eq!(tv.http_status(), 500);
    }

    #[test]
    fn provider_call_failed_passes_status_through() {
        let err = Error::ProviderCallFailed {
            kind: MediaKind::Movie,
            status: 409,
            body: "already exists".into(),
        };
        assert_eq!(err.http_status(), 409);
        assert_eq!(err.kind(), Some(MediaKind::Movie));
        assert!(err.to_string().contains("Radarr returned HTTP 409"));
    }

    #[test]
    fn provider_call_failed_bogus_status() {
        let err = Error::ProviderCallFailed {
            kind: MediaKind::Tv,
            status: 42,
            body: String::new(),
        };
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn unreachable_is_bad_gateway() {
        let err = Error::unreachable(MediaKind::Music, "connection refused");
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.to_string(), "Lidarr is unreachable: connection refused");
        assert_eq!(err.code(), "provider_unreachable");
    }

    #[test]
    fn invalid_response_is_bad_gateway() {
        let err = Error::invalid_response(MediaKind::Tv, "expected array");
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.code(), "provider_invalid_response");
    }

    #[test]
    fn not_configured_is_service_unavailable() {
        let err = Error::ProviderNotConfigured(MediaKind::Music);
        assert_eq!(err.to_string(), "Lidarr is not configured");
        assert_eq!(err.http_status(), 503);
    }

    #[test]
    fn internal_has_no_kind() {
        let err = Error::Internal("boom".into());
        assert_eq!(err.kind(), None);
        assert_eq!(err.http_status(), 500);
    }
}
