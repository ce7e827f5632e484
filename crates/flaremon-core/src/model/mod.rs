// ── Domain model ──
//
// Types shared by the policy, registry, mapper, and collector. None of
// them know about HTTP or the wire format.

pub mod location;
pub mod query;
pub mod record;
pub mod resource;
pub mod tier;

// ── Re-exports ──────────────────────────────────────────────────────

pub use location::{LocationCode, Provenance, UNKNOWN};
pub use query::{AnalyticsQuery, DNS_METRICS, DnsDimension, QueryKind};
pub use record::{MetricKind, MetricRecord};
pub use resource::MonitoredResource;
pub use tier::ServiceTier;
