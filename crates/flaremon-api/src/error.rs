use thiserror::Error;

/// Top-level error type for the `flaremon-api` crate.
///
/// Covers every failure mode of the two upstream surfaces: the Cloudflare
/// v4 REST API and the public status page. `flaremon-core` maps these into
/// its own error type.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials were rejected by the API.
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Credentials could not be turned into request headers.
    #[error("Invalid credentials: {reason}")]
    InvalidCredentials { reason: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Rate limited by the API. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error from the `{ success, errors }` envelope.
    #[error("Cloudflare API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// Non-success status from an endpoint without an error envelope.
    #[error("Unexpected HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::InvalidCredentials { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } | Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } | Self::HttpStatus { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the API error code, if available.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_transient() {
        let err = Error::RateLimited {
            retry_after_secs: 30,
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn server_errors_are_transient_client_errors_are_not() {
        let server = Error::Api {
            status: 502,
            code: None,
            message: "bad gateway".into(),
        };
        let client = Error::Api {
            status: 400,
            code: Some(1004),
            message: "bad request".into(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert_eq!(client.api_error_code(), Some(1004));
    }

    #[test]
    fn not_found_covers_both_surfaces() {
        let api = Error::Api {
            status: 404,
            code: Some(7003),
            message: "no route".into(),
        };
        let status_page = Error::HttpStatus {
            status: 404,
            url: "https://status.example/summary.json".into(),
        };
        assert!(api.is_not_found());
        assert!(status_page.is_not_found());
    }
}
