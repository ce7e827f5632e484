// Cloudflare API credentials
//
// Two schemes are accepted by the v4 API: a scoped API token sent as a
// bearer token, or the legacy global API key paired with the account email.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

const X_AUTH_KEY: HeaderName = HeaderName::from_static("x-auth-key");
const X_AUTH_EMAIL: HeaderName = HeaderName::from_static("x-auth-email");

/// Credentials used to authenticate against the Cloudflare API.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Scoped API token (`Authorization: Bearer <token>`).
    ApiToken(SecretString),
    /// Global API key with the owning account's email address.
    ApiKey { key: SecretString, email: String },
}

impl Credentials {
    /// Short name of the scheme, safe for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiToken(_) => "api-token",
            Self::ApiKey { .. } => "api-key",
        }
    }

    /// Render the credentials as default request headers.
    ///
    /// Secret header values are marked sensitive so they never show up
    /// in reqwest's debug output.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        match self {
            Self::ApiToken(token) => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())).map_err(
                        |_| Error::InvalidCredentials {
                            reason: "API token contains characters not allowed in a header",
                        },
                    )?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Self::ApiKey { key, email } => {
                let mut key_value = HeaderValue::from_str(key.expose_secret()).map_err(|_| {
                    Error::InvalidCredentials {
                        reason: "API key contains characters not allowed in a header",
                    }
                })?;
                key_value.set_sensitive(true);
                let email_value =
                    HeaderValue::from_str(email).map_err(|_| Error::InvalidCredentials {
                        reason: "email contains characters not allowed in a header",
                    })?;
                headers.insert(X_AUTH_KEY, key_value);
                headers.insert(X_AUTH_EMAIL, email_value);
            }
        }
        Ok(headers)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_becomes_bearer_header() {
        let creds = Credentials::ApiToken(SecretString::from("abc123".to_owned()));
        let headers = creds.headers().unwrap();
        let auth = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer abc123");
        assert!(auth.is_sensitive());
        assert_eq!(creds.kind(), "api-token");
    }

    #[test]
    fn key_and_email_become_auth_headers() {
        let creds = Credentials::ApiKey {
            key: SecretString::from("k3y".to_owned()),
            email: "ops@example.com".into(),
        };
        let headers = creds.headers().unwrap();
        assert_eq!(headers.get("x-auth-key").unwrap(), "k3y");
        assert_eq!(headers.get("x-auth-email").unwrap(), "ops@example.com");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn newline_in_token_is_rejected() {
        let creds = Credentials::ApiToken(SecretString::from("bad\ntoken".to_owned()));
        assert!(matches!(
            creds.headers(),
            Err(Error::InvalidCredentials { .. })
        ));
    }
}
