// ── Response Mapper ──
//
// Turns analytics responses into metric records. Two shapes: dashboard
// totals (zone-wide or per location) and decoded DNS rows. Missing
// breakdowns contribute nothing; nothing here fails.

use std::collections::HashMap;

use flaremon_api::models::{AnalyticsTotals, ColoAnalytics, DnsReport, DnsRow};

use crate::model::{MetricRecord, MonitoredResource};
use crate::policy::{Namespace, TierPolicy};
use crate::registry::LocationRegistry;
use crate::schema::{
    BANDWIDTH_BY_CONTENT_TYPE, BANDWIDTH_BY_COUNTRY, BANDWIDTH_CACHED, BANDWIDTH_ENCRYPTED,
    BANDWIDTH_TOTAL, BANDWIDTH_UNCACHED, BANDWIDTH_UNENCRYPTED, DNS_QUERIES, DNS_STALE_QUERIES,
    DNS_UNCACHED_QUERIES, Family, NOT_APPLICABLE, PAGEVIEWS_BY_SEARCH_ENGINE, PAGEVIEWS_TOTAL,
    REQUESTS_BY_CONTENT_TYPE, REQUESTS_BY_COUNTRY, REQUESTS_BY_IP_CLASS, REQUESTS_BY_STATUS,
    REQUESTS_CACHED, REQUESTS_ENCRYPTED, REQUESTS_TOTAL, REQUESTS_UNCACHED, REQUESTS_UNENCRYPTED,
    THREATS_BY_COUNTRY, THREATS_BY_TYPE, THREATS_TOTAL, UNIQUE_IP_ADDRESSES,
};

/// A response from the analytics source, by shape.
#[derive(Debug, Clone)]
pub enum AnalyticsResponse {
    /// Zone-wide dashboard totals.
    Totals(AnalyticsTotals),
    /// Dashboard totals broken out per location.
    PerLocation(Vec<ColoAnalytics>),
    /// Decoded DNS report rows.
    Dns(DnsReport),
}

/// Maps responses to records, resolving location codes through a shared
/// registry.
#[derive(Debug, Clone, Copy)]
pub struct ResponseMapper<'a> {
    registry: &'a LocationRegistry,
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn count(value: u64) -> f64 {
    value as f64
}

impl<'a> ResponseMapper<'a> {
    pub fn new(registry: &'a LocationRegistry) -> Self {
        Self { registry }
    }

    /// Map one response for `resource`.
    pub fn map(
        &self,
        resource: &MonitoredResource,
        policy: &TierPolicy,
        response: &AnalyticsResponse,
    ) -> Vec<MetricRecord> {
        let mut out = Vec::new();
        match response {
            AnalyticsResponse::Totals(totals) => {
                let labels = vec![resource.id.clone(), resource.name.clone()];
                map_totals(Namespace::Base, &labels, totals, &mut out);
            }
            AnalyticsResponse::PerLocation(colos) => {
                for colo in colos {
                    let Some(totals) = colo.latest() else {
                        continue;
                    };
                    let mut labels = vec![resource.id.clone(), resource.name.clone()];
                    labels.extend(self.location_labels(&colo.colo_id));
                    map_totals(Namespace::PerLocation, &labels, totals, &mut out);
                }
            }
            AnalyticsResponse::Dns(report) => {
                let namespace = policy.dns_namespace();
                for row in &report.rows {
                    self.map_dns_row(namespace, resource, row, &mut out);
                }
            }
        }
        out
    }

    /// `location_code`, `location_name`, `location_region` for a raw code.
    ///
    /// The code label keeps the raw value so distinct upstream codes stay
    /// distinct series even when they resolve to the same entry.
    fn location_labels(&self, raw: &str) -> [String; 3] {
        let entry = self.registry.resolve(raw);
        let raw = raw.trim();
        let code = if raw.is_empty() {
            entry.code.clone()
        } else {
            raw.to_owned()
        };
        [code, entry.display_name.clone(), entry.region.clone()]
    }

    fn map_dns_row(
        &self,
        namespace: Namespace,
        resource: &MonitoredResource,
        row: &DnsRow,
        out: &mut Vec<MetricRecord>,
    ) {
        let key = row.key();
        let [code, name, region] = match row.location() {
            Some(raw) => self.location_labels(raw),
            None => [NOT_APPLICABLE, NOT_APPLICABLE, NOT_APPLICABLE].map(str::to_owned),
        };
        let values = vec![
            resource.id.clone(),
            resource.name.clone(),
            key.query_name.clone(),
            key.response_code.clone(),
            key.origin.clone(),
            key.tcp.clone(),
            key.ip_version.clone(),
            code,
            name,
            region,
            row.query_type().unwrap_or(NOT_APPLICABLE).to_owned(),
        ];

        let counts = row.counts();
        out.push(DNS_QUERIES.record(namespace, values.clone(), counts.queries));
        out.push(DNS_UNCACHED_QUERIES.record(namespace, values.clone(), counts.uncached));
        out.push(DNS_STALE_QUERIES.record(namespace, values, counts.stale));
    }
}

fn map_totals(
    namespace: Namespace,
    labels: &[String],
    totals: &AnalyticsTotals,
    out: &mut Vec<MetricRecord>,
) {
    let scalar = |family: &Family, value: u64| family.record(namespace, labels.to_vec(), count(value));

    let requests = &totals.requests;
    let bandwidth = &totals.bandwidth;
    out.extend([
        scalar(&REQUESTS_TOTAL, requests.all),
        scalar(&REQUESTS_CACHED, requests.cached),
        scalar(&REQUESTS_UNCACHED, requests.uncached),
        scalar(&REQUESTS_ENCRYPTED, requests.ssl.encrypted),
        scalar(&REQUESTS_UNENCRYPTED, requests.ssl.unencrypted),
        scalar(&BANDWIDTH_TOTAL, bandwidth.all),
        scalar(&BANDWIDTH_CACHED, bandwidth.cached),
        scalar(&BANDWIDTH_UNCACHED, bandwidth.uncached),
        scalar(&BANDWIDTH_ENCRYPTED, bandwidth.ssl.encrypted),
        scalar(&BANDWIDTH_UNENCRYPTED, bandwidth.ssl.unencrypted),
        scalar(&THREATS_TOTAL, totals.threats.all),
        scalar(&PAGEVIEWS_TOTAL, totals.pageviews.all),
        scalar(&UNIQUE_IP_ADDRESSES, totals.uniques.all),
    ]);

    let breakdowns: [(&Family, &HashMap<String, u64>); 9] = [
        (&REQUESTS_BY_STATUS, &requests.http_status),
        (&REQUESTS_BY_CONTENT_TYPE, &requests.content_type),
        (&REQUESTS_BY_COUNTRY, &requests.country),
        (&REQUESTS_BY_IP_CLASS, &requests.ip_class),
        (&BANDWIDTH_BY_CONTENT_TYPE, &bandwidth.content_type),
        (&BANDWIDTH_BY_COUNTRY, &bandwidth.country),
        (&THREATS_BY_TYPE, &totals.threats.by_type),
        (&THREATS_BY_COUNTRY, &totals.threats.country),
        (&PAGEVIEWS_BY_SEARCH_ENGINE, &totals.pageviews.search_engine),
    ];
    for (family, entries) in breakdowns {
        for (category, value) in entries {
            let mut values = labels.to_vec();
            values.push(category.clone());
            out.push(family.record(namespace, values, count(*value)));
        }
    }
}
