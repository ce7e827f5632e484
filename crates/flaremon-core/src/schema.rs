// ── Metric families ──
//
// Every metric the exporter emits, with its label-key schema fixed at
// compile time. A family's keys depend only on its namespace, never on
// the data, so one metric name always carries one key set. Values that
// do not apply degrade to a placeholder; keys are never dropped.

use crate::model::MetricKind::{Counter, Gauge};
use crate::model::{MetricKind, MetricRecord};
use crate::policy::Namespace;

/// Label value used where a dimension does not apply to a row.
pub const NOT_APPLICABLE: &str = "N/A";

pub const RESOURCE_LABELS: &[&str] = &["resource_id", "resource_name"];
pub const LOCATION_LABELS: &[&str] = &["location_code", "location_name", "location_region"];

pub const DNS_LABELS: &[&str] = &[
    "resource_id",
    "resource_name",
    "query_name",
    "response_code",
    "origin",
    "tcp",
    "ip_version",
    "location_code",
    "location_name",
    "location_region",
    "query_type",
];

/// How a family's label keys are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSchema {
    /// Resource labels, then location labels in the per-location
    /// namespace, then the breakdown label if there is one.
    Dashboard { breakdown: Option<&'static str> },
    /// The same keys in every namespace.
    Fixed(&'static [&'static str]),
}

impl LabelSchema {
    pub fn keys(&self, namespace: Namespace) -> Vec<&'static str> {
        match self {
            Self::Dashboard { breakdown } => {
                let mut keys = RESOURCE_LABELS.to_vec();
                if namespace == Namespace::PerLocation {
                    keys.extend_from_slice(LOCATION_LABELS);
                }
                keys.extend(breakdown.iter().copied());
                keys
            }
            Self::Fixed(keys) => keys.to_vec(),
        }
    }
}

/// A metric family: name suffix, help text, type, and label schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Family {
    pub suffix: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    pub schema: LabelSchema,
    /// Namespace used by [`Family::fixed`].
    pub home: Namespace,
}

impl Family {
    /// Full metric name in `namespace`.
    pub fn metric_name(&self, namespace: Namespace) -> String {
        format!("{}_{}", namespace.prefix(), self.suffix)
    }

    /// Build a record; `values` line up with [`LabelSchema::keys`].
    pub fn record(&self, namespace: Namespace, values: Vec<String>, value: f64) -> MetricRecord {
        let keys = self.schema.keys(namespace);
        debug_assert_eq!(
            keys.len(),
            values.len(),
            "label arity mismatch for {}",
            self.suffix
        );
        MetricRecord {
            name: self.metric_name(namespace),
            help: self.help,
            kind: self.kind,
            labels: keys.into_iter().zip(values).collect(),
            value,
        }
    }

    /// Build a record in the family's home namespace.
    pub fn fixed(&self, values: Vec<String>, value: f64) -> MetricRecord {
        self.record(self.home, values, value)
    }
}

const fn dashboard(
    suffix: &'static str,
    help: &'static str,
    kind: MetricKind,
    breakdown: Option<&'static str>,
) -> Family {
    Family {
        suffix,
        help,
        kind,
        schema: LabelSchema::Dashboard { breakdown },
        home: Namespace::Base,
    }
}

const fn fixed(
    home: Namespace,
    suffix: &'static str,
    help: &'static str,
    keys: &'static [&'static str],
) -> Family {
    Family {
        suffix,
        help,
        kind: MetricKind::Gauge,
        schema: LabelSchema::Fixed(keys),
        home,
    }
}

// ── Requests ─────────────────────────────────────────────────────────

pub const REQUESTS_TOTAL: Family =
    dashboard("requests_total", "Requests served", Counter, None);
pub const REQUESTS_CACHED: Family =
    dashboard("requests_cached", "Requests served from cache", Counter, None);
pub const REQUESTS_UNCACHED: Family =
    dashboard("requests_uncached", "Requests forwarded to the origin", Counter, None);
pub const REQUESTS_ENCRYPTED: Family =
    dashboard("requests_encrypted", "Requests served over TLS", Counter, None);
pub const REQUESTS_UNENCRYPTED: Family =
    dashboard("requests_unencrypted", "Requests served without TLS", Counter, None);
pub const REQUESTS_BY_STATUS: Family = dashboard(
    "requests_by_status",
    "Requests by HTTP response status",
    Counter,
    Some("status_code"),
);
pub const REQUESTS_BY_CONTENT_TYPE: Family = dashboard(
    "requests_by_content_type",
    "Requests by response content type",
    Counter,
    Some("content_type"),
);
pub const REQUESTS_BY_COUNTRY: Family = dashboard(
    "requests_by_country",
    "Requests by client country",
    Counter,
    Some("country_code"),
);
pub const REQUESTS_BY_IP_CLASS: Family = dashboard(
    "requests_by_ip_class",
    "Requests by client IP class",
    Counter,
    Some("ip_class"),
);

// ── Bandwidth ────────────────────────────────────────────────────────

pub const BANDWIDTH_TOTAL: Family =
    dashboard("bandwidth_total_bytes", "Bytes served", Gauge, None);
pub const BANDWIDTH_CACHED: Family =
    dashboard("bandwidth_cached_bytes", "Bytes served from cache", Gauge, None);
pub const BANDWIDTH_UNCACHED: Family =
    dashboard("bandwidth_uncached_bytes", "Bytes fetched from the origin", Gauge, None);
pub const BANDWIDTH_ENCRYPTED: Family =
    dashboard("bandwidth_encrypted_bytes", "Bytes served over TLS", Gauge, None);
pub const BANDWIDTH_UNENCRYPTED: Family =
    dashboard("bandwidth_unencrypted_bytes", "Bytes served without TLS", Gauge, None);
pub const BANDWIDTH_BY_CONTENT_TYPE: Family = dashboard(
    "bandwidth_by_content_type_bytes",
    "Bytes served by response content type",
    Gauge,
    Some("content_type"),
);
pub const BANDWIDTH_BY_COUNTRY: Family = dashboard(
    "bandwidth_by_country_bytes",
    "Bytes served by client country",
    Gauge,
    Some("country_code"),
);

// ── Threats, pageviews, uniques ──────────────────────────────────────

pub const THREATS_TOTAL: Family = dashboard("threats_total", "Threats seen", Gauge, None);
pub const THREATS_BY_TYPE: Family =
    dashboard("threats_by_type", "Threats by type", Gauge, Some("type"));
pub const THREATS_BY_COUNTRY: Family = dashboard(
    "threats_by_country",
    "Threats by client country",
    Gauge,
    Some("country_code"),
);
pub const PAGEVIEWS_TOTAL: Family = dashboard("pageviews_total", "Pageviews", Gauge, None);
pub const PAGEVIEWS_BY_SEARCH_ENGINE: Family = dashboard(
    "pageviews_by_search_engine",
    "Pageviews by search engine crawler",
    Gauge,
    Some("search_engine"),
);
pub const UNIQUE_IP_ADDRESSES: Family = dashboard(
    "unique_ip_addresses_total",
    "Unique visitor IP addresses",
    Gauge,
    None,
);

/// Every dashboard family, in emission order.
pub const DASHBOARD_FAMILIES: &[Family] = &[
    REQUESTS_TOTAL,
    REQUESTS_CACHED,
    REQUESTS_UNCACHED,
    REQUESTS_ENCRYPTED,
    REQUESTS_UNENCRYPTED,
    REQUESTS_BY_STATUS,
    REQUESTS_BY_CONTENT_TYPE,
    REQUESTS_BY_COUNTRY,
    REQUESTS_BY_IP_CLASS,
    BANDWIDTH_TOTAL,
    BANDWIDTH_CACHED,
    BANDWIDTH_UNCACHED,
    BANDWIDTH_ENCRYPTED,
    BANDWIDTH_UNENCRYPTED,
    BANDWIDTH_BY_CONTENT_TYPE,
    BANDWIDTH_BY_COUNTRY,
    THREATS_TOTAL,
    THREATS_BY_TYPE,
    THREATS_BY_COUNTRY,
    PAGEVIEWS_TOTAL,
    PAGEVIEWS_BY_SEARCH_ENGINE,
    UNIQUE_IP_ADDRESSES,
];

// ── DNS ──────────────────────────────────────────────────────────────

pub const DNS_QUERIES: Family = fixed(
    Namespace::Base,
    "dns_record_queries_total",
    "DNS queries in the last minute",
    DNS_LABELS,
);
pub const DNS_UNCACHED_QUERIES: Family = fixed(
    Namespace::Base,
    "dns_record_uncached_queries_total",
    "Uncached DNS queries in the last minute",
    DNS_LABELS,
);
pub const DNS_STALE_QUERIES: Family = fixed(
    Namespace::Base,
    "dns_record_stale_queries_total",
    "DNS queries answered from stale cache in the last minute",
    DNS_LABELS,
);

// ── Status feed ──────────────────────────────────────────────────────

pub const POP_STATUS: Family = fixed(
    Namespace::Base,
    "pop_status",
    "Data center status (1 = operational)",
    &["status", "location_code", "location_name", "location_region"],
);
pub const REGION_STATUS: Family = fixed(
    Namespace::Base,
    "region_status",
    "Region status (1 = operational)",
    &["status", "location_region"],
);
pub const SERVICE_STATUS: Family = fixed(
    Namespace::Base,
    "service_status",
    "Service status (1 = operational)",
    &["status", "service_name"],
);
pub const UP: Family = fixed(
    Namespace::Base,
    "up",
    "Overall platform status (1 = no incident)",
    &["indicator", "description"],
);

// ── Exporter self metrics ────────────────────────────────────────────

pub const COMPONENT_PROCESSING_TIME: Family = fixed(
    Namespace::Exporter,
    "component_processing_time_seconds",
    "Time spent fetching and mapping one analytics component",
    &["resource_id", "resource_name", "component"],
);
pub const PROCESSING_TIME: Family = fixed(
    Namespace::Exporter,
    "processing_time_seconds",
    "Time spent collecting one zone",
    &["resource_id", "resource_name"],
);
pub const BUILD_INFO: Family = fixed(
    Namespace::Exporter,
    "build_info",
    "Exporter build information",
    &["version"],
);
