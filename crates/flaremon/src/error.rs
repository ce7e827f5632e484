//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use flaremon_config::ConfigError;
use flaremon_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NO_ZONES: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(flaremon::connection_failed),
        help(
            "Check network access to the Cloudflare API.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(flaremon::timeout),
        help("Increase the timeout with --timeout or [collection] timeout.")
    )]
    Timeout { seconds: u64 },

    #[error("Could not listen on {address}")]
    #[diagnostic(
        code(flaremon::bind),
        help("Pick another address with --listen-address or [web] listen_address.")
    )]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(flaremon::auth_failed),
        help(
            "Verify the API token and its permissions.\n\
             The token needs Zone:Read, Analytics:Read, and DNS:Read."
        )
    )]
    AuthFailed { message: String },

    #[error("No Cloudflare credentials configured")]
    #[diagnostic(
        code(flaremon::no_credentials),
        help(
            "Pass --api-token or set CF_API_TOKEN.\n\
             Or set [api] token_env, token, or key + email in the config file."
        )
    )]
    NoCredentials,

    // ── Zones ────────────────────────────────────────────────────────
    #[error("No zones to monitor: {filter}")]
    #[diagnostic(
        code(flaremon::no_zones),
        help("Check the --zone names and that the token can read those zones.")
    )]
    NoZones { filter: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(flaremon::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(flaremon::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(flaremon::config))]
    Config(Box<figment::Error>),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(flaremon::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Metric exposition failed: {0}")]
    #[diagnostic(code(flaremon::exposition))]
    Exposition(#[from] prometheus::Error),

    #[error("Invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NoZones { .. } => exit_code::NO_ZONES,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::NoResources { filter } => Self::NoZones { filter },
            CoreError::RateLimited { retry_after_secs } => Self::ApiError {
                message: format!("rate limited, retry after {retry_after_secs}s"),
            },
            CoreError::NotFound { identifier } => Self::ApiError {
                message: format!("not found: {identifier}"),
            },
            CoreError::Api { message, code, .. } => Self::ApiError {
                message: match code {
                    Some(code) => format!("{message} (code {code})"),
                    None => message,
                },
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials => Self::NoCredentials,
            ConfigError::Figment(err) => Self::Config(err),
            ConfigError::Serialization(err) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let no_zones = CliError::from(CoreError::no_resources(&["missing.example".to_owned()]));
        assert_eq!(no_zones.exit_code(), exit_code::NO_ZONES);
        assert!(no_zones.to_string().contains("missing.example"));

        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "Invalid API Token".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        assert_eq!(CliError::from(ConfigError::NoCredentials).exit_code(), exit_code::AUTH);
        assert_eq!(
            CliError::from(CoreError::Timeout { timeout_secs: 30 }).exit_code(),
            exit_code::TIMEOUT
        );
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "https://api.example".into(),
                reason: "refused".into(),
            })
            .exit_code(),
            exit_code::CONNECTION
        );
    }

    #[test]
    fn api_errors_keep_their_code() {
        let err = CliError::from(CoreError::Api {
            message: "Invalid zone identifier".into(),
            code: Some(7003),
            status: Some(400),
        });
        assert_eq!(err.to_string(), "API error: Invalid zone identifier (code 7003)");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
