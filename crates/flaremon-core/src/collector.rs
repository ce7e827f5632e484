// ── Collection Orchestrator ──
//
// One collection pass per scrape: refresh the location registry from the
// status feed, then query and map every zone with bounded concurrency.
// Failures are isolated per zone and per query kind; only an empty zone
// list at startup is fatal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info, warn};

use crate::config::ExporterConfig;
use crate::error::CoreError;
use crate::mapper::ResponseMapper;
use crate::model::{AnalyticsQuery, MetricRecord, MonitoredResource, QueryKind};
use crate::policy::TierPolicy;
use crate::registry::LocationRegistry;
use crate::schema::{COMPONENT_PROCESSING_TIME, PROCESSING_TIME};
use crate::source::{AnalyticsSource, CloudflareSource};
use crate::status::map_status;

/// Which parts of a scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorSettings {
    pub dashboard: bool,
    pub dns: bool,
    pub status: bool,
    /// Zones collected at once; values below 1 are treated as 1.
    pub concurrency: usize,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            dashboard: true,
            dns: true,
            status: true,
            concurrency: 4,
        }
    }
}

impl From<&ExporterConfig> for CollectorSettings {
    fn from(config: &ExporterConfig) -> Self {
        Self {
            dashboard: config.dashboard_enabled,
            dns: config.dns_enabled,
            status: config.status_enabled,
            concurrency: config.concurrency,
        }
    }
}

/// A recovered failure inside one scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeFailure {
    Query {
        resource_id: String,
        resource_name: String,
        kind: QueryKind,
        error: String,
    },
    StatusFeed {
        error: String,
    },
}

/// The outcome of one collection pass.
#[derive(Debug, Default)]
pub struct Scrape {
    pub records: Vec<MetricRecord>,
    pub failures: Vec<ScrapeFailure>,
}

impl Scrape {
    fn merge(&mut self, other: Self) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}

// ── Collector ────────────────────────────────────────────────────

/// Collects metric records for a fixed set of zones.
///
/// Cheaply cloneable via `Arc<CollectorInner>`. The zone list and tiers
/// are resolved once at construction and never change mid-scrape.
pub struct Collector<S = CloudflareSource> {
    inner: Arc<CollectorInner<S>>,
}

impl<S> Clone for Collector<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CollectorInner<S> {
    source: S,
    registry: Arc<LocationRegistry>,
    resources: Vec<MonitoredResource>,
    settings: CollectorSettings,
}

impl Collector<CloudflareSource> {
    /// Build the Cloudflare source, discover zones, and seed the registry
    /// with the built-in locations.
    ///
    /// Fails with [`CoreError::NoResources`] when no zone matches.
    pub async fn connect(config: &ExporterConfig) -> Result<Self, CoreError> {
        let source = CloudflareSource::new(config)?;
        let registry = Arc::new(LocationRegistry::with_builtins());
        Self::discover(source, registry, &config.zone_names, config.into()).await
    }
}

impl<S: AnalyticsSource> Collector<S> {
    /// Discover zones through `source` and build a collector for them.
    pub async fn discover(
        source: S,
        registry: Arc<LocationRegistry>,
        zone_names: &[String],
        settings: CollectorSettings,
    ) -> Result<Self, CoreError> {
        let resources = source.list_resources(zone_names).await?;
        Self::from_parts(source, registry, resources, settings, zone_names)
    }

    /// Build a collector for an already known zone list.
    ///
    /// Duplicate zone ids are dropped; an empty list is an error that
    /// names `zone_names`.
    pub fn from_parts(
        source: S,
        registry: Arc<LocationRegistry>,
        resources: Vec<MonitoredResource>,
        settings: CollectorSettings,
        zone_names: &[String],
    ) -> Result<Self, CoreError> {
        let mut unique: Vec<MonitoredResource> = Vec::with_capacity(resources.len());
        for resource in resources {
            if unique.iter().any(|r| r.id == resource.id) {
                continue;
            }
            unique.push(resource);
        }
        if unique.is_empty() {
            return Err(CoreError::no_resources(zone_names));
        }

        for resource in &unique {
            info!(
                resource_id = %resource.id,
                resource_name = %resource.name,
                tier = %resource.tier,
                "monitoring zone"
            );
        }

        Ok(Self {
            inner: Arc::new(CollectorInner {
                source,
                registry,
                resources: unique,
                settings,
            }),
        })
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn resources(&self) -> &[MonitoredResource] {
        &self.inner.resources
    }

    pub fn registry(&self) -> &Arc<LocationRegistry> {
        &self.inner.registry
    }

    pub fn settings(&self) -> CollectorSettings {
        self.inner.settings
    }

    // ── Collection ───────────────────────────────────────────────

    /// Run one collection pass ending now.
    pub async fn collect(&self) -> Scrape {
        self.collect_at(Utc::now()).await
    }

    /// Run one collection pass with query windows ending at `now`.
    ///
    /// Dropping the returned future abandons the pass and every
    /// in-flight request with it.
    pub async fn collect_at(&self, now: DateTime<Utc>) -> Scrape {
        let started = Instant::now();
        let mut scrape = Scrape::default();

        if self.inner.settings.status {
            self.refresh_status(&mut scrape).await;
        }

        let concurrency = self.inner.settings.concurrency.max(1);
        let parts: Vec<Scrape> = stream::iter(self.inner.resources.clone())
            .map(|resource| {
                let this = self.clone();
                async move { this.collect_resource(&resource, now).await }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;
        for part in parts {
            scrape.merge(part);
        }

        debug!(
            records = scrape.records.len(),
            failures = scrape.failures.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "collection pass finished"
        );
        scrape
    }

    /// Learn locations from the status feed and emit status records.
    /// On failure the registry keeps its previous contents.
    async fn refresh_status(&self, scrape: &mut Scrape) {
        match self.inner.source.status_summary().await {
            Ok(summary) => {
                self.inner.registry.refresh_from_status(&summary);
                scrape.records.extend(map_status(&summary));
            }
            Err(e) => {
                warn!(error = %e, "status feed unavailable (non-fatal)");
                scrape.failures.push(ScrapeFailure::StatusFeed {
                    error: e.to_string(),
                });
            }
        }
    }

    async fn collect_resource(&self, resource: &MonitoredResource, now: DateTime<Utc>) -> Scrape {
        let started = Instant::now();
        let policy = TierPolicy::resolve(resource.tier);
        let settings = self.inner.settings;

        let dashboard = async {
            if settings.dashboard {
                let query = AnalyticsQuery::dashboard(resource, &policy, now);
                Some(self.run_query(resource, &policy, query).await)
            } else {
                None
            }
        };
        let dns = async {
            if settings.dns {
                let query = AnalyticsQuery::dns(resource, &policy, now);
                Some(self.run_query(resource, &policy, query).await)
            } else {
                None
            }
        };
        let (dashboard, dns) = tokio::join!(dashboard, dns);

        let mut scrape = Scrape::default();
        for (kind, outcome) in [(QueryKind::Dashboard, dashboard), (QueryKind::Dns, dns)] {
            let Some((result, elapsed)) = outcome else {
                continue;
            };
            scrape.records.push(COMPONENT_PROCESSING_TIME.fixed(
                vec![resource.id.clone(), resource.name.clone(), kind.to_string()],
                elapsed.as_secs_f64(),
            ));
            match result {
                Ok(records) => scrape.records.extend(records),
                Err(error) => scrape.failures.push(ScrapeFailure::Query {
                    resource_id: resource.id.clone(),
                    resource_name: resource.name.clone(),
                    kind,
                    error,
                }),
            }
        }

        scrape.records.push(PROCESSING_TIME.fixed(
            vec![resource.id.clone(), resource.name.clone()],
            started.elapsed().as_secs_f64(),
        ));
        scrape
    }

    /// Fetch and map one query. Errors are logged here and returned as text.
    async fn run_query(
        &self,
        resource: &MonitoredResource,
        policy: &TierPolicy,
        query: AnalyticsQuery,
    ) -> (Result<Vec<MetricRecord>, String>, Duration) {
        let started = Instant::now();
        let result = match self.inner.source.fetch(&query).await {
            Ok(response) => {
                let records =
                    ResponseMapper::new(&self.inner.registry).map(resource, policy, &response);
                debug!(
                    resource_id = %resource.id,
                    query = %query.kind,
                    records = records.len(),
                    "mapped analytics"
                );
                Ok(records)
            }
            Err(e) => {
                warn!(
                    resource_id = %resource.id,
                    resource_name = %resource.name,
                    query = %query.kind,
                    error = %e,
                    "analytics query failed"
                );
                Err(e.to_string())
            }
        };
        (result, started.elapsed())
    }
}
