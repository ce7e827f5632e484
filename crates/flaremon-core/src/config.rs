// ── Runtime exporter configuration ──
//
// Describes *what* to collect and *how* to reach the upstream services.
// Carries credential data and tuning, but never touches disk: the binary
// builds an `ExporterConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// How to authenticate with the Cloudflare API.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Scoped API token (preferred).
    ApiToken(SecretString),
    /// Global API key plus account email.
    ApiKey { key: SecretString, email: String },
}

/// Everything the collector needs at runtime.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// API base URL (e.g. `https://api.cloudflare.com/client/v4/`).
    pub api_url: Url,
    /// Status summary URL.
    pub status_url: Url,
    pub auth: AuthCredentials,
    /// Zone names to monitor; empty means every visible zone.
    pub zone_names: Vec<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How many zones are collected at once.
    pub concurrency: usize,
    pub dashboard_enabled: bool,
    pub dns_enabled: bool,
    pub status_enabled: bool,
}

impl ExporterConfig {
    /// A config with every collector enabled and default tuning.
    pub fn new(api_url: Url, status_url: Url, auth: AuthCredentials) -> Self {
        Self {
            api_url,
            status_url,
            auth,
            zone_names: Vec::new(),
            timeout: Duration::from_secs(30),
            concurrency: 4,
            dashboard_enabled: true,
            dns_enabled: true,
            status_enabled: true,
        }
    }
}
