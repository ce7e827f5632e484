// Cloudflare API wire types
//
// Everything the v4 API and the status page hand back, deserialized as
// leniently as the upstream allows: absent counters default to zero and
// absent breakdowns to empty maps.

use std::collections::HashMap;

use serde::Deserialize;

// ── Envelope ─────────────────────────────────────────────────────────

/// The `{ success, errors, messages, result, result_info }` wrapper every
/// v4 endpoint returns.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// An entry of the envelope's `errors` or `messages` arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub count: u32,
    pub total_count: u32,
}

// ── Zones ────────────────────────────────────────────────────────────

/// A zone as returned by `GET /zones`.
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub plan: ZonePlan,
}

/// The subscription plan attached to a zone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ZonePlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub currency: Option<String>,
    pub frequency: Option<String>,
    pub legacy_id: String,
    pub is_subscribed: bool,
}

// ── Dashboard analytics ──────────────────────────────────────────────

/// `GET /zones/{id}/analytics/dashboard` result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardAnalytics {
    pub totals: AnalyticsTotals,
    pub timeseries: Vec<AnalyticsTotals>,
}

/// One entry of `GET /zones/{id}/analytics/colos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColoAnalytics {
    pub colo_id: String,
    pub totals: Option<AnalyticsTotals>,
    pub timeseries: Vec<AnalyticsTotals>,
}

impl ColoAnalytics {
    /// The aggregate for this location: explicit totals when present,
    /// otherwise the most recent timeseries bucket.
    pub fn latest(&self) -> Option<&AnalyticsTotals> {
        self.totals.as_ref().or_else(|| self.timeseries.last())
    }
}

/// Aggregated counters over one time window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsTotals {
    pub since: Option<String>,
    pub until: Option<String>,
    pub requests: RequestTotals,
    pub bandwidth: BandwidthTotals,
    pub threats: ThreatTotals,
    pub pageviews: PageviewTotals,
    pub uniques: UniqueTotals,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestTotals {
    pub all: u64,
    pub cached: u64,
    pub uncached: u64,
    pub ssl: SslTotals,
    pub http_status: HashMap<String, u64>,
    pub content_type: HashMap<String, u64>,
    pub country: HashMap<String, u64>,
    pub ip_class: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BandwidthTotals {
    pub all: u64,
    pub cached: u64,
    pub uncached: u64,
    pub ssl: SslTotals,
    pub content_type: HashMap<String, u64>,
    pub country: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SslTotals {
    pub encrypted: u64,
    pub unencrypted: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThreatTotals {
    pub all: u64,
    #[serde(rename = "type")]
    pub by_type: HashMap<String, u64>,
    pub country: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageviewTotals {
    pub all: u64,
    pub search_engine: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UniqueTotals {
    pub all: u64,
}

// ── DNS analytics ────────────────────────────────────────────────────

/// `GET /zones/{id}/dns_analytics/report` result, before row decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDnsReport {
    pub rows: u64,
    pub data: Vec<RawDnsRow>,
}

/// A positional DNS report row: dimension values and metric values in
/// the order they were requested.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDnsRow {
    pub dimensions: Vec<String>,
    pub metrics: Vec<f64>,
}

/// The dimensions every DNS row carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsKey {
    pub query_name: String,
    pub response_code: String,
    pub origin: String,
    pub tcp: String,
    pub ip_version: String,
}

/// Query counters of one DNS row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DnsCounts {
    pub queries: f64,
    pub uncached: f64,
    pub stale: f64,
}

/// A DNS report row decoded by shape. The shape follows from how many
/// dimensions were requested, which in turn follows from the zone's tier.
#[derive(Debug, Clone, PartialEq)]
pub enum DnsRow {
    Base {
        key: DnsKey,
        counts: DnsCounts,
    },
    WithLocation {
        key: DnsKey,
        location: String,
        counts: DnsCounts,
    },
    WithLocationAndQueryType {
        key: DnsKey,
        location: String,
        query_type: String,
        counts: DnsCounts,
    },
}

/// A row whose shape matched none of the known layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("DNS row has {dimensions} dimensions and {metrics} metrics")]
pub struct MalformedDnsRow {
    pub dimensions: usize,
    pub metrics: usize,
}

impl TryFrom<&RawDnsRow> for DnsRow {
    type Error = MalformedDnsRow;

    fn try_from(raw: &RawDnsRow) -> Result<Self, Self::Error> {
        let malformed = MalformedDnsRow {
            dimensions: raw.dimensions.len(),
            metrics: raw.metrics.len(),
        };
        let counts = match *raw.metrics.as_slice() {
            [queries, uncached, stale, ..] => DnsCounts {
                queries,
                uncached,
                stale,
            },
            _ => return Err(malformed),
        };
        let key = |dims: &[String]| -> Option<DnsKey> {
            let [query_name, response_code, origin, tcp, ip_version] = dims else {
                return None;
            };
            Some(DnsKey {
                query_name: query_name.clone(),
                response_code: response_code.clone(),
                origin: origin.clone(),
                tcp: tcp.clone(),
                ip_version: ip_version.clone(),
            })
        };

        match raw.dimensions.as_slice() {
            [base @ .., location, query_type] if base.len() == 5 => Ok(Self::WithLocationAndQueryType {
                key: key(base).ok_or(malformed)?,
                location: location.clone(),
                query_type: query_type.clone(),
                counts,
            }),
            [base @ .., location] if base.len() == 5 => Ok(Self::WithLocation {
                key: key(base).ok_or(malformed)?,
                location: location.clone(),
                counts,
            }),
            base if base.len() == 5 => Ok(Self::Base {
                key: key(base).ok_or(malformed)?,
                counts,
            }),
            _ => Err(malformed),
        }
    }
}

impl DnsRow {
    pub fn key(&self) -> &DnsKey {
        match self {
            Self::Base { key, .. }
            | Self::WithLocation { key, .. }
            | Self::WithLocationAndQueryType { key, .. } => key,
        }
    }

    pub fn counts(&self) -> DnsCounts {
        match self {
            Self::Base { counts, .. }
            | Self::WithLocation { counts, .. }
            | Self::WithLocationAndQueryType { counts, .. } => *counts,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Base { .. } => None,
            Self::WithLocation { location, .. }
            | Self::WithLocationAndQueryType { location, .. } => Some(location),
        }
    }

    pub fn query_type(&self) -> Option<&str> {
        match self {
            Self::WithLocationAndQueryType { query_type, .. } => Some(query_type),
            _ => None,
        }
    }
}

/// A decoded DNS report. Rows that could not be decoded are counted in
/// `skipped` and otherwise dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DnsReport {
    pub rows: Vec<DnsRow>,
    pub skipped: usize,
}

// ── Status page ──────────────────────────────────────────────────────

/// `GET /api/v2/summary.json` on the status page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusSummary {
    pub status: PageStatus,
    pub components: Vec<StatusComponent>,
}

/// The page-wide status indicator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageStatus {
    pub indicator: String,
    pub description: String,
}

/// A status page component. Group components (`group: true`) contain
/// leaf components, which point back to them through `group_id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusComponent {
    pub id: String,
    pub name: String,
    pub status: String,
    pub group_id: Option<String>,
    pub group: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw(dimensions: &[&str], metrics: &[f64]) -> RawDnsRow {
        RawDnsRow {
            dimensions: dimensions.iter().map(|d| (*d).to_owned()).collect(),
            metrics: metrics.to_vec(),
        }
    }

    #[test]
    fn five_dimensions_decode_as_base_row() {
        let row = DnsRow::try_from(&raw(
            &["example.com", "NOERROR", "1.1.1.1", "0", "4"],
            &[10.0, 2.0, 1.0],
        ))
        .unwrap();
        assert_eq!(row.key().query_name, "example.com");
        assert_eq!(row.location(), None);
        assert_eq!(row.query_type(), None);
        assert_eq!(row.counts().queries, 10.0);
    }

    #[test]
    fn seven_dimensions_carry_location_and_query_type() {
        let row = DnsRow::try_from(&raw(
            &["a.example.com", "NXDOMAIN", "x", "1", "6", "AMS", "AAAA"],
            &[5.0, 5.0, 0.0],
        ))
        .unwrap();
        assert_eq!(row.location(), Some("AMS"));
        assert_eq!(row.query_type(), Some("AAAA"));
        assert_eq!(row.counts().uncached, 5.0);
    }

    #[test]
    fn six_dimensions_carry_location_only() {
        let row = DnsRow::try_from(&raw(
            &["a.example.com", "NOERROR", "x", "0", "4", "SJC-PIG"],
            &[1.0, 0.0, 0.0],
        ))
        .unwrap();
        assert!(matches!(row, DnsRow::WithLocation { .. }));
        assert_eq!(row.location(), Some("SJC-PIG"));
    }

    #[test]
    fn short_rows_are_rejected() {
        let err = DnsRow::try_from(&raw(&["a", "b", "c"], &[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(
            err,
            MalformedDnsRow {
                dimensions: 3,
                metrics: 3
            }
        );
        assert!(DnsRow::try_from(&raw(&["a", "b", "c", "d", "e"], &[1.0])).is_err());
        assert!(
            DnsRow::try_from(&raw(&["a", "b", "c", "d", "e", "f", "g", "h"], &[1.0, 1.0, 1.0]))
                .is_err()
        );
    }

    #[test]
    fn colo_latest_prefers_totals_then_last_bucket() {
        let mut colo: ColoAnalytics = serde_json::from_str(
            r#"{"colo_id":"AMS","timeseries":[{"requests":{"all":1}},{"requests":{"all":7}}]}"#,
        )
        .unwrap();
        assert_eq!(colo.latest().unwrap().requests.all, 7);

        colo.totals = Some(AnalyticsTotals::default());
        assert_eq!(colo.latest().unwrap().requests.all, 0);
    }

    #[test]
    fn totals_tolerate_missing_sections() {
        let totals: AnalyticsTotals =
            serde_json::from_str(r#"{"requests":{"all":3,"http_status":{"200":3}}}"#).unwrap();
        assert_eq!(totals.requests.all, 3);
        assert_eq!(totals.requests.http_status.get("200"), Some(&3));
        assert_eq!(totals.bandwidth.all, 0);
        assert!(totals.threats.by_type.is_empty());
    }
}
