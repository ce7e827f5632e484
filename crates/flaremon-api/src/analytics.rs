// Zone analytics endpoints
//
// Dashboard totals, the per-location (colo) breakdown, and the DNS
// analytics report. DNS rows are decoded into their tagged shape here so
// callers never index positional arrays.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::client::CloudflareClient;
use crate::error::Error;
use crate::models::{
    ColoAnalytics, DashboardAnalytics, DnsReport, DnsRow, RawDnsReport,
};

/// Time range for the dashboard and colo endpoints.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub since: DateTime<Utc>,
    /// `None` lets the API default to "now".
    pub until: Option<DateTime<Utc>>,
    /// Restrict the result to time buckets that are complete.
    pub continuous: bool,
}

impl DashboardOptions {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("since", timestamp(&self.since)),
            ("continuous", self.continuous.to_string()),
        ];
        if let Some(until) = &self.until {
            query.push(("until", timestamp(until)));
        }
        query
    }
}

/// Parameters of a DNS analytics report.
#[derive(Debug, Clone)]
pub struct DnsReportOptions {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub metrics: Vec<String>,
    pub dimensions: Vec<String>,
}

impl DnsReportOptions {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("since", timestamp(&self.since)),
            ("until", timestamp(&self.until)),
            ("metrics", self.metrics.join(",")),
            ("dimensions", self.dimensions.join(",")),
        ]
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl CloudflareClient {
    /// Zone-wide dashboard totals.
    ///
    /// `GET /zones/{zone_id}/analytics/dashboard`
    pub async fn dashboard(
        &self,
        zone_id: &str,
        opts: &DashboardOptions,
    ) -> Result<DashboardAnalytics, Error> {
        let url = self.api_url(&format!("zones/{zone_id}/analytics/dashboard"))?;
        Ok(self.get(url, &opts.query()).await?.result)
    }

    /// Dashboard totals broken out per location.
    ///
    /// `GET /zones/{zone_id}/analytics/colos`
    pub async fn colos(
        &self,
        zone_id: &str,
        opts: &DashboardOptions,
    ) -> Result<Vec<ColoAnalytics>, Error> {
        let url = self.api_url(&format!("zones/{zone_id}/analytics/colos"))?;
        let colos: Vec<ColoAnalytics> = self.get(url, &opts.query()).await?.result;
        debug!(zone_id, locations = colos.len(), "fetched colo analytics");
        Ok(colos)
    }

    /// DNS analytics report, rows decoded by shape.
    ///
    /// `GET /zones/{zone_id}/dns_analytics/report`
    ///
    /// Rows whose shape does not match any known layout are skipped with a
    /// warning and counted in [`DnsReport::skipped`].
    pub async fn dns_report(
        &self,
        zone_id: &str,
        opts: &DnsReportOptions,
    ) -> Result<DnsReport, Error> {
        let url = self.api_url(&format!("zones/{zone_id}/dns_analytics/report"))?;
        let raw: RawDnsReport = self.get(url, &opts.query()).await?.result;

        let mut report = DnsReport::default();
        for row in &raw.data {
            match DnsRow::try_from(row) {
                Ok(decoded) => report.rows.push(decoded),
                Err(e) => {
                    warn!(zone_id, error = %e, "skipping malformed DNS analytics row");
                    report.skipped += 1;
                }
            }
        }
        debug!(
            zone_id,
            rows = report.rows.len(),
            skipped = report.skipped,
            "fetched DNS analytics"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn dns_query_joins_lists_with_commas() {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
        let until = Utc.with_ymd_and_hms(2024, 5, 1, 12, 1, 0).single();
        let (Some(since), Some(until)) = (since, until) else {
            panic!("valid timestamps");
        };
        let opts = DnsReportOptions {
            since,
            until,
            metrics: vec!["queryCount".into(), "uncachedCount".into()],
            dimensions: vec!["queryName".into(), "coloName".into()],
        };
        let query = opts.query();
        assert!(query.contains(&("since", "2024-05-01T12:00:00Z".to_owned())));
        assert!(query.contains(&("metrics", "queryCount,uncachedCount".to_owned())));
        assert!(query.contains(&("dimensions", "queryName,coloName".to_owned())));
    }

    #[test]
    fn dashboard_query_omits_open_until() {
        let opts = DashboardOptions {
            since: Utc::now(),
            until: None,
            continuous: true,
        };
        let query = opts.query();
        assert!(query.iter().all(|(k, _)| *k != "until"));
        assert!(query.contains(&("continuous", "true".to_owned())));
    }
}
