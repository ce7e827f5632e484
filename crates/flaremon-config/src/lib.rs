//! Configuration for the flaremon exporter.
//!
//! Layered TOML + environment loading (figment), the API credential
//! chain (env var, keyring, plaintext), and translation into
//! `flaremon_core::ExporterConfig`. The binary adds its CLI flag
//! overrides on top of the `Config` returned here.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use flaremon_api::client::DEFAULT_BASE_URL;
use flaremon_api::status::DEFAULT_SUMMARY_URL;
use flaremon_core::{AuthCredentials, ExporterConfig};

/// Keyring service name; the token is stored under [`KEYRING_TOKEN_ENTRY`].
pub const KEYRING_SERVICE: &str = "flaremon";
pub const KEYRING_TOKEN_ENTRY: &str = "api-token";

/// Prefix of environment overrides, e.g. `FLAREMON_WEB__LISTEN_ADDRESS`.
pub const ENV_PREFIX: &str = "FLAREMON_";

const REDACTED: &str = "<redacted>";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no Cloudflare credentials configured")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub status: StatusSection,

    #[serde(default)]
    pub collection: CollectionSection,

    #[serde(default)]
    pub web: WebSection,
}

/// `[api]`: where the Cloudflare API lives and how to authenticate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token (plaintext; prefer `token_env` or the keyring).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Global API key, used together with `email`.
    pub key: Option<String>,

    pub email: Option<String>,

    /// Consult the system keyring for a token.
    #[serde(default = "default_true")]
    pub keyring: bool,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_env: None,
            key: None,
            email: None,
            keyring: true,
        }
    }
}

/// `[status]`: the public status feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_status_url")]
    pub url: String,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_status_url(),
        }
    }
}

/// `[collection]`: which zones and analytics to collect.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionSection {
    /// Zone names; empty means every zone the credentials can see.
    #[serde(default)]
    pub zones: Vec<String>,

    #[serde(default = "default_true")]
    pub dashboard: bool,

    #[serde(default = "default_true")]
    pub dns: bool,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CollectionSection {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            dashboard: true,
            dns: true,
            concurrency: default_concurrency(),
            timeout: default_timeout(),
        }
    }
}

/// `[web]`: the HTTP listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebSection {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            telemetry_path: default_telemetry_path(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_status_url() -> String {
    DEFAULT_SUMMARY_URL.into()
}
fn default_concurrency() -> usize {
    4
}
fn default_timeout() -> u64 {
    30
}
fn default_listen_address() -> String {
    "0.0.0.0:9199".into()
}
fn default_telemetry_path() -> String {
    "/metrics".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "flaremon").map_or_else(
        || PathBuf::from(".config").join("flaremon").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack: defaults, then the TOML file, then `FLAREMON_*`
/// environment variables (nested keys split on `__`).
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the config from `path`, or from [`config_path`] when `None`.
/// A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

impl Config {
    /// A copy safe to print: secrets are replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let hide = |value: &mut Option<String>| {
            if value.is_some() {
                *value = Some(REDACTED.into());
            }
        };
        hide(&mut copy.api.token);
        hide(&mut copy.api.key);
        copy
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed listener address.
    pub fn listen_address(&self) -> Result<SocketAddr, ConfigError> {
        self.web.listen_address.parse().map_err(|_| {
            ConfigError::invalid(
                "web.listen_address",
                format!("expected host:port, got '{}'", self.web.listen_address),
            )
        })
    }

    /// The telemetry path, which must be absolute and must not shadow
    /// the landing page at `/`.
    pub fn telemetry_path(&self) -> Result<&str, ConfigError> {
        let path = self.web.telemetry_path.as_str();
        if !path.starts_with('/') {
            return Err(ConfigError::invalid(
                "web.telemetry_path",
                format!("must start with '/', got '{path}'"),
            ));
        }
        if path == "/" {
            return Err(ConfigError::invalid(
                "web.telemetry_path",
                "must not be '/', which serves the landing page",
            ));
        }
        Ok(path)
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve credentials from the process environment and keyring.
pub fn resolve_auth(api: &ApiSection) -> Result<AuthCredentials, ConfigError> {
    resolve_auth_with(api, |name| std::env::var(name).ok())
}

/// Resolve credentials, reading environment variables through `env`.
///
/// Token chain: `token_env` variable, keyring entry, plaintext `token`.
/// Without a token, `key` and `email` must both be set.
pub fn resolve_auth_with(
    api: &ApiSection,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AuthCredentials, ConfigError> {
    // 1. Env var named by token_env
    if let Some(token) = api
        .token_env
        .as_deref()
        .and_then(&env)
        .filter(|t| !t.trim().is_empty())
    {
        return Ok(AuthCredentials::ApiToken(SecretString::from(token)));
    }

    // 2. System keyring
    if let Some(token) = api.keyring.then(keyring_token).flatten() {
        return Ok(AuthCredentials::ApiToken(SecretString::from(token)));
    }

    // 3. Plaintext in config
    if let Some(token) = api.token.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(AuthCredentials::ApiToken(SecretString::from(token.to_owned())));
    }

    // 4. Global key + email
    match (api.key.as_deref(), api.email.as_deref()) {
        (Some(key), Some(email)) => Ok(AuthCredentials::ApiKey {
            key: SecretString::from(key.to_owned()),
            email: email.to_owned(),
        }),
        (Some(_), None) => Err(ConfigError::invalid(
            "api.email",
            "an API key needs the account email",
        )),
        (None, Some(_)) => Err(ConfigError::invalid(
            "api.key",
            "an account email needs the global API key",
        )),
        (None, None) => Err(ConfigError::NoCredentials),
    }
}

fn keyring_token() -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_ENTRY)
        .ok()?
        .get_password()
        .ok()
}

// ── Translation to core ─────────────────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::invalid(field, format!("invalid URL: {raw}")))
}

/// Build an `ExporterConfig` from already resolved credentials.
pub fn to_exporter_config(
    config: &Config,
    auth: AuthCredentials,
) -> Result<ExporterConfig, ConfigError> {
    let api_url = parse_url("api.base_url", &config.api.base_url)?;
    let status_url = parse_url("status.url", &config.status.url)?;

    let collection = &config.collection;
    if collection.timeout == 0 {
        return Err(ConfigError::invalid(
            "collection.timeout",
            "must be at least 1 second",
        ));
    }
    if collection.concurrency == 0 {
        return Err(ConfigError::invalid(
            "collection.concurrency",
            "must be at least 1",
        ));
    }

    let zone_names = collection
        .zones
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(str::to_owned)
        .collect();

    let mut exporter = ExporterConfig::new(api_url, status_url, auth);
    exporter.zone_names = zone_names;
    exporter.timeout = Duration::from_secs(collection.timeout);
    exporter.concurrency = collection.concurrency;
    exporter.dashboard_enabled = collection.dashboard;
    exporter.dns_enabled = collection.dns;
    exporter.status_enabled = config.status.enabled;
    Ok(exporter)
}
