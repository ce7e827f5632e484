// Cloudflare v4 API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining and envelope unwrapping.
// Endpoint groups (zones, analytics) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::models::{ApiResponse, ResultInfo};
use crate::transport::TransportConfig;

/// Production base URL of the v4 API.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4/";

/// Error codes the API uses for rejected credentials on non-401 responses.
const AUTH_ERROR_CODES: &[i64] = &[6003, 6111, 9106, 9109, 10000];

/// Fallback retry delay when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// A successful envelope's payload plus its pagination info, if any.
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub result: T,
    pub info: Option<ResultInfo>,
}

/// HTTP client for the Cloudflare v4 API.
///
/// Handles the `{ success, errors, result }` envelope and credential
/// headers. All methods return unwrapped `result` payloads.
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CloudflareClient {
    /// Create a client that authenticates every request with `credentials`.
    pub fn new(
        base_url: Url,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(credentials.headers()?)?;
        debug!(scheme = credentials.kind(), base_url = %base_url, "created API client");
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for any authentication headers.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    /// Convenience constructor taking the base URL as a string.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self::with_client(http, Url::parse(base_url)?))
    }

    /// The API base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve a relative API path such as `zones/{id}/analytics/dashboard`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Page<T>, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::Transport)?;

        parse_envelope(resp).await
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Parse the `{ success, errors, result }` envelope, returning `result` on
/// success or a typed error otherwise.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Page<T>, Error> {
    let status = resp.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(Error::RateLimited { retry_after_secs });
    }

    let body = resp.text().await.map_err(Error::Transport)?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if is_auth_status(status) => {
            return Err(Error::Authentication {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }
        Err(e) if !status.is_success() => {
            debug!(error = %e, "error response without envelope");
            return Err(Error::Api {
                status: status.as_u16(),
                code: None,
                message: truncate(&body, 200),
            });
        }
        Err(e) => {
            return Err(Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }
    };

    if !envelope.success || !status.is_success() {
        let code = envelope.errors.first().and_then(|e| e.code);
        let message = if envelope.errors.is_empty() {
            format!("request failed with HTTP {}", status.as_u16())
        } else {
            envelope
                .errors
                .iter()
                .map(|e| match e.code {
                    Some(code) => format!("{} ({code})", e.message),
                    None => e.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ")
        };

        let auth_code = envelope
            .errors
            .iter()
            .any(|e| e.code.is_some_and(|c| AUTH_ERROR_CODES.contains(&c)));
        if is_auth_status(status) || auth_code {
            return Err(Error::Authentication {
                status: status.as_u16(),
                message,
            });
        }
        return Err(Error::Api {
            status: status.as_u16(),
            code,
            message,
        });
    }

    let Some(result) = envelope.result else {
        return Err(Error::Deserialization {
            message: "envelope reported success without a result".into(),
            body,
        });
    };

    Ok(Page {
        result,
        info: envelope.result_info,
    })
}

fn is_auth_status(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

fn truncate(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_added_once() {
        let url = with_trailing_slash(Url::parse("https://api.example.com/client/v4").unwrap());
        assert_eq!(url.as_str(), "https://api.example.com/client/v4/");
        let again = with_trailing_slash(url.clone());
        assert_eq!(again, url);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("  short  ", 10), "short");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
