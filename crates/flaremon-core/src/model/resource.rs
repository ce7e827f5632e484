use serde::Serialize;

use super::tier::ServiceTier;

/// A zone under monitoring. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoredResource {
    pub id: String,
    pub name: String,
    pub tier: ServiceTier,
    /// Human-readable plan name as reported by the API.
    pub plan_name: String,
}

impl MonitoredResource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tier: ServiceTier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            plan_name: String::new(),
        }
    }
}
