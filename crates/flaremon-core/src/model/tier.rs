use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A zone's subscription level. Variants are declared in ascending order,
/// so `Ord` ranks them: `Free < Pro < Business < Enterprise`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ServiceTier {
    Free,
    Pro,
    Business,
    Enterprise,
}

/// Monthly plan prices (USD) that pin a tier.
const PRO_PRICE: f64 = 20.0;
const BUSINESS_PRICE: f64 = 200.0;

impl ServiceTier {
    /// Classify a plan from its monthly price and legacy identifier.
    ///
    /// Checked from the top tier down; the first match wins. A price
    /// above the Business price or a legacy id of `enterprise` is
    /// Enterprise, and so on. Anything unmatched is Free.
    pub fn from_plan(price: f64, legacy_id: &str) -> Self {
        let id = legacy_id.trim();
        let is = |name: &str| id.eq_ignore_ascii_case(name);

        if price > BUSINESS_PRICE || is("enterprise") {
            Self::Enterprise
        } else if same_price(price, BUSINESS_PRICE) || is("business") {
            Self::Business
        } else if same_price(price, PRO_PRICE) || is("pro") {
            Self::Pro
        } else {
            Self::Free
        }
    }
}

fn same_price(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn price_and_legacy_id_classify_tiers() {
        assert_eq!(ServiceTier::from_plan(0.0, "free"), ServiceTier::Free);
        assert_eq!(ServiceTier::from_plan(20.0, ""), ServiceTier::Pro);
        assert_eq!(ServiceTier::from_plan(0.0, "pro"), ServiceTier::Pro);
        assert_eq!(ServiceTier::from_plan(200.0, "free"), ServiceTier::Business);
        assert_eq!(ServiceTier::from_plan(0.0, "business"), ServiceTier::Business);
        assert_eq!(ServiceTier::from_plan(5000.0, ""), ServiceTier::Enterprise);
        assert_eq!(ServiceTier::from_plan(0.0, "enterprise"), ServiceTier::Enterprise);
    }

    #[test]
    fn highest_matching_tier_wins() {
        // Business price with an "enterprise" legacy id: enterprise is checked first.
        assert_eq!(
            ServiceTier::from_plan(200.0, "enterprise"),
            ServiceTier::Enterprise
        );
        assert_eq!(ServiceTier::from_plan(20.0, "business"), ServiceTier::Business);
    }

    #[test]
    fn unknown_plans_are_free() {
        assert_eq!(ServiceTier::from_plan(5.0, "mystery"), ServiceTier::Free);
        assert_eq!(ServiceTier::from_plan(199.99, ""), ServiceTier::Free);
    }

    #[test]
    fn tiers_are_ordered_and_round_trip_through_strings() {
        let all: Vec<_> = ServiceTier::iter().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        for tier in all {
            assert_eq!(tier.to_string().parse::<ServiceTier>().ok(), Some(tier));
        }
        assert_eq!("Business".parse::<ServiceTier>().ok(), Some(ServiceTier::Business));
    }
}
