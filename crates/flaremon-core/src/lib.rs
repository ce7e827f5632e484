// flaremon-core: Tier policy, location registry, and metric mapping between
// flaremon-api and the exporter binary.

pub mod collector;
pub mod config;
pub mod convert;
pub mod error;
pub mod mapper;
pub mod model;
pub mod policy;
pub mod registry;
pub mod schema;
pub mod source;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collector::{Collector, CollectorSettings, Scrape, ScrapeFailure};
pub use config::{AuthCredentials, ExporterConfig};
pub use error::CoreError;
pub use mapper::{AnalyticsResponse, ResponseMapper};
pub use policy::{DashboardScope, Namespace, TierPolicy};
pub use registry::LocationRegistry;
pub use source::{AnalyticsSource, CloudflareSource};

pub use model::{
    AnalyticsQuery, DnsDimension, LocationCode, MetricKind, MetricRecord, MonitoredResource,
    Provenance, QueryKind, ServiceTier,
};
