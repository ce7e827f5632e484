//! CLI flag overrides on top of the layered `flaremon_config::Config`.
//!
//! Core never sees these types -- it receives a pre-built `ExporterConfig`.

use secrecy::SecretString;

use flaremon_config::{Config, load_config, resolve_auth, to_exporter_config};
use flaremon_core::{AuthCredentials, ExporterConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load file + environment config, then apply global flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = load_config(global.config.as_deref())?;
    apply_overrides(&mut config, global);
    Ok(config)
}

fn apply_overrides(config: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(ref url) = global.status_url {
        config.status.url.clone_from(url);
    }
    if !global.zones.is_empty() {
        config.collection.zones.clone_from(&global.zones);
    }
    if let Some(timeout) = global.timeout {
        config.collection.timeout = timeout;
    }
    if let Some(concurrency) = global.concurrency {
        config.collection.concurrency = concurrency;
    }
    if global.no_dashboard {
        config.collection.dashboard = false;
    }
    if global.no_dns {
        config.collection.dns = false;
    }
    if global.no_status {
        config.status.enabled = false;
    }
}

/// Resolve credentials: flags first, then the config chain.
fn resolve_credentials(config: &Config, global: &GlobalOpts) -> Result<AuthCredentials, CliError> {
    // 1. --api-token / CF_API_TOKEN
    if let Some(token) = global.api_token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(AuthCredentials::ApiToken(SecretString::from(token.to_owned())));
    }

    // 2. --api-key / CF_API_KEY, with the email from flag or config
    if let Some(key) = global.api_key.as_deref().filter(|k| !k.is_empty()) {
        let email = global
            .api_email
            .clone()
            .or_else(|| config.api.email.clone())
            .ok_or_else(|| CliError::Validation {
                field: "api-email".into(),
                reason: "--api-key needs --api-email or CF_API_EMAIL".into(),
            })?;
        return Ok(AuthCredentials::ApiKey {
            key: SecretString::from(key.to_owned()),
            email,
        });
    }

    // 3. token_env → keyring → plaintext → key + email
    Ok(resolve_auth(&config.api)?)
}

/// Build the core runtime config.
pub fn exporter_config(config: &Config, global: &GlobalOpts) -> Result<ExporterConfig, CliError> {
    let auth = resolve_credentials(config, global)?;
    Ok(to_exporter_config(config, auth)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["flaremon"];
        argv.extend_from_slice(args);
        argv.push("scrape");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::default();
        config.collection.zones = vec!["from-file.example".into()];
        let global = global(&[
            "--zone",
            "a.example,b.example",
            "--timeout",
            "5",
            "--no-dns",
            "--api-url",
            "http://127.0.0.1:8080/client/v4/",
        ]);

        apply_overrides(&mut config, &global);

        assert_eq!(config.collection.zones, vec!["a.example", "b.example"]);
        assert_eq!(config.collection.timeout, 5);
        assert!(!config.collection.dns);
        assert!(config.collection.dashboard);
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/client/v4/");
    }

    #[test]
    fn token_flag_beats_config_chain() {
        let mut config = Config::default();
        config.api.keyring = false;
        config.api.key = Some("file-key".into());
        let global = global(&["--api-token", "flag-token"]);

        let auth = resolve_credentials(&config, &global).unwrap();
        assert!(matches!(auth, AuthCredentials::ApiToken(_)));
    }

    #[test]
    fn key_flag_takes_email_from_config() {
        let mut config = Config::default();
        config.api.email = Some("ops@example.com".into());
        let global = global(&["--api-key", "flag-key"]);

        match resolve_credentials(&config, &global).unwrap() {
            AuthCredentials::ApiKey { email, .. } => assert_eq!(email, "ops@example.com"),
            AuthCredentials::ApiToken(_) => panic!("expected key + email"),
        }
    }

    #[test]
    fn key_flag_without_email_is_usage_error() {
        let config = Config::default();
        let global = global(&["--api-key", "flag-key"]);
        let err = resolve_credentials(&config, &global).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
