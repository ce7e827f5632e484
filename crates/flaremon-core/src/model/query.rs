use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use strum::{Display, IntoStaticStr};

use super::resource::MonitoredResource;
use crate::policy::{DashboardScope, TierPolicy};

/// Which analytics surface a query targets. The display form doubles as
/// the `component` label of the processing-time metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum QueryKind {
    #[strum(serialize = "dashboard_analytics")]
    Dashboard,
    #[strum(serialize = "dns_analytics")]
    Dns,
}

/// A DNS report dimension, in the order it is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsDimension {
    QueryName,
    ResponseCode,
    Origin,
    Tcp,
    IpVersion,
    Location,
    QueryType,
}

impl DnsDimension {
    /// Name the analytics API expects in the `dimensions` parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::QueryName => "queryName",
            Self::ResponseCode => "responseCode",
            Self::Origin => "origin",
            Self::Tcp => "tcp",
            Self::IpVersion => "ipVersion",
            Self::Location => "coloName",
            Self::QueryType => "queryType",
        }
    }
}

/// DNS measures requested on every report, in row order.
pub const DNS_METRICS: &[&str] = &["queryCount", "uncachedCount", "staleCount"];

/// A fully parameterized analytics request for one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsQuery {
    pub resource_id: String,
    pub kind: QueryKind,
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub scope: DashboardScope,
    pub metrics: &'static [&'static str],
    pub dimensions: &'static [DnsDimension],
    /// Only complete time buckets.
    pub continuous: bool,
}

impl AnalyticsQuery {
    /// Dashboard query covering the tier's lookback window, ending at `now`.
    pub fn dashboard(
        resource: &MonitoredResource,
        policy: &TierPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_id: resource.id.clone(),
            kind: QueryKind::Dashboard,
            since: now - to_chrono(policy.lookback_window),
            until: now,
            scope: policy.dashboard_scope,
            metrics: &[],
            dimensions: &[],
            continuous: true,
        }
    }

    /// DNS query covering the fixed DNS window, ending at `now`.
    pub fn dns(resource: &MonitoredResource, policy: &TierPolicy, now: DateTime<Utc>) -> Self {
        Self {
            resource_id: resource.id.clone(),
            kind: QueryKind::Dns,
            since: now - to_chrono(policy.dns_window),
            until: now,
            scope: DashboardScope::Global,
            metrics: DNS_METRICS,
            dimensions: policy.dns_dimensions,
            continuous: true,
        }
    }

    pub fn dimension_names(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .map(|d| d.api_name().to_owned())
            .collect()
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| (*m).to_owned()).collect()
    }
}

fn to_chrono(window: StdDuration) -> Duration {
    Duration::from_std(window).unwrap_or_else(|_| Duration::zero())
}
