// ── Status feed mapping ──
//
// Turns the public status summary into status records and into the
// (code, name, region) triples the registry learns from.
//
// Components come in three kinds: groups (regions), leaf components named
// "<label> - (<CODE>)" (locations), and every other leaf (services).

use std::collections::HashMap;

use flaremon_api::models::{StatusComponent, StatusSummary};

use crate::model::{MetricRecord, UNKNOWN};
use crate::schema::{POP_STATUS, REGION_STATUS, SERVICE_STATUS, UP};

/// Group names containing this are the platform itself, not a region.
const PLATFORM_BRAND: &str = "Cloudflare";

/// A leaf component identified as a data-center location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationComponent<'a> {
    pub code: &'a str,
    pub display_name: &'a str,
    pub region: &'a str,
    pub status: &'a str,
}

/// Split a component name of the form `"<label> - (<CODE>)"`.
///
/// The last ` - (` separates label from code, so labels may themselves
/// contain dashes. Returns `None` for any other shape.
pub fn parse_location_name(name: &str) -> Option<(&str, &str)> {
    let (label, rest) = name.trim().rsplit_once(" - (")?;
    let code = rest.strip_suffix(')')?.trim();
    let label = label.trim();
    if label.is_empty() || code.is_empty() {
        return None;
    }
    Some((label, code))
}

/// 1 for a healthy status string, 0 for anything else.
pub fn status_value(status: &str) -> f64 {
    match status {
        "operational" | "none" => 1.0,
        _ => 0.0,
    }
}

fn group_names(summary: &StatusSummary) -> HashMap<&str, &str> {
    summary
        .components
        .iter()
        .filter(|c| c.group)
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect()
}

fn leaves(summary: &StatusSummary) -> impl Iterator<Item = &StatusComponent> {
    summary.components.iter().filter(|c| !c.group)
}

/// Every location component, with its region taken from its group.
pub fn location_components(summary: &StatusSummary) -> Vec<LocationComponent<'_>> {
    let groups = group_names(summary);
    leaves(summary)
        .filter_map(|component| {
            let (display_name, code) = parse_location_name(&component.name)?;
            let region = component
                .group_id
                .as_deref()
                .and_then(|id| groups.get(id).copied())
                .unwrap_or(UNKNOWN);
            Some(LocationComponent {
                code,
                display_name,
                region,
                status: &component.status,
            })
        })
        .collect()
}

/// Map a status summary to status records: one `up` gauge, one record per
/// region group, per location, and per named service.
pub fn map_status(summary: &StatusSummary) -> Vec<MetricRecord> {
    let mut records = vec![UP.fixed(
        vec![
            summary.status.indicator.clone(),
            summary.status.description.clone(),
        ],
        status_value(&summary.status.indicator),
    )];

    records.extend(
        summary
            .components
            .iter()
            .filter(|c| c.group && !c.name.contains(PLATFORM_BRAND))
            .map(|group| {
                REGION_STATUS.fixed(
                    vec![group.status.clone(), group.name.clone()],
                    status_value(&group.status),
                )
            }),
    );

    for location in location_components(summary) {
        records.push(POP_STATUS.fixed(
            vec![
                location.status.to_owned(),
                location.code.to_owned(),
                location.display_name.to_owned(),
                location.region.to_owned(),
            ],
            status_value(location.status),
        ));
    }

    records.extend(
        leaves(summary)
            .filter(|c| parse_location_name(&c.name).is_none())
            .map(|service| {
                SERVICE_STATUS.fixed(
                    vec![service.status.clone(), service.name.clone()],
                    status_value(&service.status),
                )
            }),
    );

    records
}
