//! Command dispatch: bridges CLI args to the collector and the listener.

pub mod config_cmd;
pub mod scrape;
pub mod serve;
pub mod zones;

use flaremon_core::Collector;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Load config, resolve credentials, and discover zones.
///
/// Fails before anything is served when no zone matches.
pub async fn connect(global: &GlobalOpts) -> Result<Collector, CliError> {
    let cfg = config::load(global)?;
    connect_with(&cfg, global).await
}

pub async fn connect_with(
    cfg: &flaremon_config::Config,
    global: &GlobalOpts,
) -> Result<Collector, CliError> {
    let exporter = config::exporter_config(cfg, global)?;
    tracing::debug!(
        api_url = %exporter.api_url,
        zones = ?exporter.zone_names,
        "connecting"
    );
    Ok(Collector::connect(&exporter).await?)
}
