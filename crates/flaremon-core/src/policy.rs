// ── Tier Policy Resolver ──
//
// Pure mapping from a zone's tier to how it is polled: lookback window,
// dashboard scope, DNS breakdown dimensions, and metric namespace.

use std::time::Duration;

use crate::model::{DnsDimension, ServiceTier};

/// Whether dashboard analytics are requested zone-wide or per location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardScope {
    Global,
    PerLocation,
}

/// Metric name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `cloudflare_*`
    Base,
    /// `cloudflare_pop_*`
    PerLocation,
    /// `cloudflare_exporter_*`, the exporter's own metrics.
    Exporter,
}

impl Namespace {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Base => "cloudflare",
            Self::PerLocation => "cloudflare_pop",
            Self::Exporter => "cloudflare_exporter",
        }
    }
}

const DNS_BASE: &[DnsDimension] = &[
    DnsDimension::QueryName,
    DnsDimension::ResponseCode,
    DnsDimension::Origin,
    DnsDimension::Tcp,
    DnsDimension::IpVersion,
];

const DNS_WITH_LOCATION: &[DnsDimension] = &[
    DnsDimension::QueryName,
    DnsDimension::ResponseCode,
    DnsDimension::Origin,
    DnsDimension::Tcp,
    DnsDimension::IpVersion,
    DnsDimension::Location,
];

const DNS_WITH_QUERY_TYPE: &[DnsDimension] = &[
    DnsDimension::QueryName,
    DnsDimension::ResponseCode,
    DnsDimension::Origin,
    DnsDimension::Tcp,
    DnsDimension::IpVersion,
    DnsDimension::Location,
    DnsDimension::QueryType,
];

/// DNS reports always cover the last minute.
const DNS_WINDOW: Duration = Duration::from_secs(60);

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;

/// How a zone of a given tier is polled. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    pub tier: ServiceTier,
    /// How far back dashboard queries reach. Finer tiers get shorter
    /// windows, which the API answers at finer granularity.
    pub lookback_window: Duration,
    pub dashboard_scope: DashboardScope,
    /// DNS report dimensions, in request order. Row decoding depends on it.
    pub dns_dimensions: &'static [DnsDimension],
    pub dns_window: Duration,
}

impl TierPolicy {
    /// Resolve the policy for `tier`. Total; no failure mode.
    pub const fn resolve(tier: ServiceTier) -> Self {
        let (lookback_secs, dashboard_scope, dns_dimensions) = match tier {
            ServiceTier::Enterprise => (30 * MINUTE, DashboardScope::PerLocation, DNS_WITH_QUERY_TYPE),
            ServiceTier::Business => (6 * HOUR, DashboardScope::Global, DNS_WITH_QUERY_TYPE),
            ServiceTier::Pro => (24 * HOUR, DashboardScope::Global, DNS_WITH_LOCATION),
            ServiceTier::Free => (7 * 24 * HOUR, DashboardScope::Global, DNS_BASE),
        };
        Self {
            tier,
            lookback_window: Duration::from_secs(lookback_secs),
            dashboard_scope,
            dns_dimensions,
            dns_window: DNS_WINDOW,
        }
    }

    /// Namespace of dashboard records.
    pub fn dashboard_namespace(&self) -> Namespace {
        match self.dashboard_scope {
            DashboardScope::Global => Namespace::Base,
            DashboardScope::PerLocation => Namespace::PerLocation,
        }
    }

    /// Namespace of DNS records: per-location once rows carry a location.
    pub fn dns_namespace(&self) -> Namespace {
        if self.dns_dimensions.contains(&DnsDimension::Location) {
            Namespace::PerLocation
        } else {
            Namespace::Base
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn lookback_windows_match_tiers() {
        let window = |t| TierPolicy::resolve(t).lookback_window;
        assert_eq!(window(ServiceTier::Enterprise), Duration::from_secs(30 * 60));
        assert_eq!(window(ServiceTier::Business), Duration::from_secs(6 * 3600));
        assert_eq!(window(ServiceTier::Pro), Duration::from_secs(24 * 3600));
        assert_eq!(window(ServiceTier::Free), Duration::from_secs(7 * 24 * 3600));
    }

    #[test]
    fn only_enterprise_breaks_dashboard_out_by_location() {
        for tier in ServiceTier::iter() {
            let expected = if tier == ServiceTier::Enterprise {
                DashboardScope::PerLocation
            } else {
                DashboardScope::Global
            };
            assert_eq!(TierPolicy::resolve(tier).dashboard_scope, expected, "{tier}");
        }
    }

    #[test]
    fn dns_dimensions_extend_the_free_list_in_order() {
        let free = TierPolicy::resolve(ServiceTier::Free).dns_dimensions;
        let mut previous = free.len();
        for tier in ServiceTier::iter() {
            let dims = TierPolicy::resolve(tier).dns_dimensions;
            assert!(dims.starts_with(free), "{tier} must start with the free list");
            assert!(dims.len() >= previous, "{tier} must not shrink");
            previous = dims.len();
        }
    }

    #[test]
    fn dns_dimension_names_are_load_bearing() {
        let names: Vec<_> = TierPolicy::resolve(ServiceTier::Business)
            .dns_dimensions
            .iter()
            .map(|d| d.api_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "queryName",
                "responseCode",
                "origin",
                "tcp",
                "ipVersion",
                "coloName",
                "queryType"
            ]
        );
        assert_eq!(
            TierPolicy::resolve(ServiceTier::Pro).dns_dimensions.last(),
            Some(&DnsDimension::Location)
        );
    }

    #[test]
    fn namespaces_follow_the_tier_table() {
        let free = TierPolicy::resolve(ServiceTier::Free);
        assert_eq!(free.dashboard_namespace(), Namespace::Base);
        assert_eq!(free.dns_namespace(), Namespace::Base);

        let pro = TierPolicy::resolve(ServiceTier::Pro);
        assert_eq!(pro.dashboard_namespace(), Namespace::Base);
        assert_eq!(pro.dns_namespace(), Namespace::PerLocation);

        let business = TierPolicy::resolve(ServiceTier::Business);
        assert_eq!(business.dashboard_namespace(), Namespace::Base);
        assert_eq!(business.dns_namespace(), Namespace::PerLocation);

        let enterprise = TierPolicy::resolve(ServiceTier::Enterprise);
        assert_eq!(enterprise.dashboard_namespace(), Namespace::PerLocation);
        assert_eq!(Namespace::PerLocation.prefix(), "cloudflare_pop");
    }

    #[test]
    fn dns_window_is_one_minute_for_every_tier() {
        for tier in ServiceTier::iter() {
            assert_eq!(TierPolicy::resolve(tier).dns_window, Duration::from_secs(60));
        }
    }
}
