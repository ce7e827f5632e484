//! `flaremon serve`: run the HTTP listener until Ctrl-C.

use tokio_util::sync::CancellationToken;

use crate::cli::{GlobalOpts, ServeArgs};
use crate::error::CliError;
use crate::{config, server};

pub async fn handle(args: ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load(global)?;
    if let Some(address) = args.listen_address {
        cfg.web.listen_address = address;
    }
    if let Some(path) = args.telemetry_path {
        cfg.web.telemetry_path = path;
    }

    // Validate the listener settings before touching the network.
    let address = cfg.listen_address()?;
    let telemetry_path = cfg.telemetry_path()?.to_owned();

    let collector = super::connect_with(&cfg, global).await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(server::cancel_on_signal(shutdown.clone()));
    server::run(collector, address, &telemetry_path, shutdown).await
}
