//! `flaremon zones`: the zones that would be monitored, with their tier.

use serde_json::json;

use flaremon_core::{MonitoredResource, TierPolicy};

use crate::cli::{GlobalOpts, ZonesArgs};
use crate::error::CliError;

pub async fn handle(args: ZonesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let collector = super::connect(global).await?;
    let resources = collector.resources();

    if args.json {
        let rows: Vec<_> = resources.iter().map(json_row).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", table(resources));
    Ok(())
}

fn json_row(resource: &MonitoredResource) -> serde_json::Value {
    let policy = TierPolicy::resolve(resource.tier);
    json!({
        "id": resource.id,
        "name": resource.name,
        "tier": resource.tier,
        "plan": resource.plan_name,
        "lookback_secs": policy.lookback_window.as_secs(),
        "per_location": policy.dashboard_namespace() == flaremon_core::Namespace::PerLocation,
    })
}

fn table(resources: &[MonitoredResource]) -> String {
    let name_width = resources
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("ZONE".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!("{:<name_width$}  {:<32}  {:<10}  WINDOW\n", "ZONE", "ID", "TIER");
    for resource in resources {
        let policy = TierPolicy::resolve(resource.tier);
        out.push_str(&format!(
            "{:<name_width$}  {:<32}  {:<10}  {}s\n",
            resource.name,
            resource.id,
            resource.tier.to_string(),
            policy.lookback_window.as_secs(),
        ));
    }
    out
}
