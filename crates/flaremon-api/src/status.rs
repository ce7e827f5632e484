// Cloudflare status page client
//
// The status page is a public Statuspage.io summary; it needs no
// credentials and has no `{ success, result }` envelope.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::StatusSummary;
use crate::transport::TransportConfig;

/// Production URL of the status summary.
pub const DEFAULT_SUMMARY_URL: &str = "https://www.cloudflarestatus.com/api/v2/summary.json";

/// HTTP client for the public status summary.
#[derive(Debug, Clone)]
pub struct StatusPageClient {
    http: reqwest::Client,
    summary_url: Url,
}

impl StatusPageClient {
    pub fn new(summary_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::with_client(transport.build_client()?, summary_url))
    }

    pub fn with_client(http: reqwest::Client, summary_url: Url) -> Self {
        Self { http, summary_url }
    }

    pub fn summary_url(&self) -> &Url {
        &self.summary_url
    }

    /// Fetch the current status summary.
    pub async fn summary(&self) -> Result<StatusSummary, Error> {
        debug!("GET {}", self.summary_url);

        let resp = self
            .http
            .get(self.summary_url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: self.summary_url.to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
