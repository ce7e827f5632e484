// ── Core error types ──
//
// Errors surfaced by flaremon-core. Consumers never see HTTP status codes
// or JSON parse failures directly: the `From<flaremon_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("No zones to monitor ({filter})")]
    NoResources { filter: String },

    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Cloudflare's numeric error code, when the envelope carried one.
        code: Option<i64>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build the error reported when zone discovery matched nothing.
    pub fn no_resources(names: &[String]) -> Self {
        let filter = if names.is_empty() {
            "the credentials can see no zones".to_owned()
        } else {
            format!("couldn't find any zones named {}", names.join(", "))
        };
        Self::NoResources { filter }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<flaremon_api::Error> for CoreError {
    fn from(err: flaremon_api::Error) -> Self {
        use flaremon_api::Error as ApiError;

        match err {
            ApiError::Authentication { message, .. } => Self::AuthenticationFailed { message },
            ApiError::InvalidCredentials { reason } => Self::AuthenticationFailed {
                message: reason.to_owned(),
            },
            ApiError::Transport(ref e) => {
                let url = e.url().map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    Self::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::ClientBuild(reason) => Self::Internal(format!("HTTP client: {reason}")),
            ApiError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
            ApiError::Api {
                status: 404,
                message,
                ..
            } => Self::NotFound {
                identifier: message,
            },
            ApiError::Api {
                status,
                code,
                message,
            } => Self::Api {
                message,
                code,
                status: Some(status),
            },
            ApiError::HttpStatus { status, url } => Self::Api {
                message: format!("HTTP {status} from {url}"),
                code: None,
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => {
                Self::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_resources_names_the_filter() {
        let err = CoreError::no_resources(&["a.com".into(), "b.org".into()]);
        assert_eq!(
            err.to_string(),
            "No zones to monitor (couldn't find any zones named a.com, b.org)"
        );
    }

    #[test]
    fn api_auth_error_becomes_authentication_failed() {
        let err: CoreError = flaremon_api::Error::Authentication {
            status: 403,
            message: "Invalid API Token (9109)".into(),
        }
        .into();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn api_404_becomes_not_found() {
        let err: CoreError = flaremon_api::Error::Api {
            status: 404,
            code: Some(7003),
            message: "Could not route".into(),
        }
        .into();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
