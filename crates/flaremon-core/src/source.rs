// ── Analytics source ──
//
// The seam between the collector and the upstream services. The
// production implementation talks to Cloudflare; tests plug in fakes.

use std::future::Future;

use flaremon_api::models::StatusSummary;
use flaremon_api::{
    CloudflareClient, DashboardOptions, DnsReportOptions, StatusPageClient, TransportConfig,
};
use tracing::debug;

use crate::config::ExporterConfig;
use crate::error::CoreError;
use crate::mapper::AnalyticsResponse;
use crate::model::{AnalyticsQuery, MonitoredResource, QueryKind};
use crate::policy::DashboardScope;

/// Where zones, analytics, and status come from.
///
/// Every call either returns a parsed response or a terminal error in
/// bounded time; timeouts and retries are the implementation's business.
pub trait AnalyticsSource: Send + Sync + 'static {
    /// Zones to monitor; all visible zones when `names` is empty.
    fn list_resources(
        &self,
        names: &[String],
    ) -> impl Future<Output = Result<Vec<MonitoredResource>, CoreError>> + Send;

    /// Run one analytics query.
    fn fetch(
        &self,
        query: &AnalyticsQuery,
    ) -> impl Future<Output = Result<AnalyticsResponse, CoreError>> + Send;

    /// Current status summary.
    fn status_summary(&self) -> impl Future<Output = Result<StatusSummary, CoreError>> + Send;
}

/// [`AnalyticsSource`] backed by the Cloudflare API and status page.
#[derive(Debug, Clone)]
pub struct CloudflareSource {
    api: CloudflareClient,
    status: StatusPageClient,
    timeout_secs: u64,
}

impl CloudflareSource {
    pub fn new(config: &ExporterConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let credentials = flaremon_api::Credentials::from(&config.auth);
        let api = CloudflareClient::new(config.api_url.clone(), &credentials, &transport)?;
        let status = StatusPageClient::new(config.status_url.clone(), &transport)?;
        Ok(Self {
            api,
            status,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn from_clients(api: CloudflareClient, status: StatusPageClient) -> Self {
        Self {
            api,
            status,
            timeout_secs: TransportConfig::default().timeout.as_secs(),
        }
    }

    /// Translate an API error, filling in the configured timeout.
    fn error(&self, err: flaremon_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.timeout_secs,
            },
            other => other,
        }
    }
}

impl AnalyticsSource for CloudflareSource {
    async fn list_resources(&self, names: &[String]) -> Result<Vec<MonitoredResource>, CoreError> {
        let zones = self
            .api
            .list_zones(names)
            .await
            .map_err(|e| self.error(e))?;
        debug!(count = zones.len(), "discovered zones");
        Ok(zones.iter().map(MonitoredResource::from).collect())
    }

    async fn fetch(&self, query: &AnalyticsQuery) -> Result<AnalyticsResponse, CoreError> {
        let zone_id = query.resource_id.as_str();
        match query.kind {
            QueryKind::Dashboard => {
                let opts = DashboardOptions {
                    since: query.since,
                    until: Some(query.until),
                    continuous: query.continuous,
                };
                match query.scope {
                    DashboardScope::Global => {
                        let dashboard = self
                            .api
                            .dashboard(zone_id, &opts)
                            .await
                            .map_err(|e| self.error(e))?;
                        Ok(AnalyticsResponse::Totals(dashboard.totals))
                    }
                    DashboardScope::PerLocation => {
                        let colos = self
                            .api
                            .colos(zone_id, &opts)
                            .await
                            .map_err(|e| self.error(e))?;
                        Ok(AnalyticsResponse::PerLocation(colos))
                    }
                }
            }
            QueryKind::Dns => {
                let opts = DnsReportOptions {
                    since: query.since,
                    until: query.until,
                    metrics: query.metric_names(),
                    dimensions: query.dimension_names(),
                };
                let report = self
                    .api
                    .dns_report(zone_id, &opts)
                    .await
                    .map_err(|e| self.error(e))?;
                Ok(AnalyticsResponse::Dns(report))
            }
        }
    }

    async fn status_summary(&self) -> Result<StatusSummary, CoreError> {
        self.status.summary().await.map_err(|e| self.error(e))
    }
}
