//! `flaremon config`: print the effective configuration.

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let source = global
        .config
        .clone()
        .unwrap_or_else(flaremon_config::config_path);
    println!("# {}", source.display());
    print!("{}", cfg.redacted().to_toml()?);
    Ok(())
}
