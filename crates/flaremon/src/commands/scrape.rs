//! `flaremon scrape`: one collection pass printed to stdout.

use std::io::Write;

use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::exposition;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let collector = super::connect(global).await?;

    let mut scrape = collector.collect().await;
    // Each failure was already logged where it happened.
    debug!(failures = scrape.failures.len(), "scrape finished");
    scrape.records.push(exposition::build_info());

    let text = exposition::render(&scrape.records)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
