// ── API-to-domain type conversions ──
//
// Bridges raw `flaremon_api` response types into `flaremon_core::model`
// domain types.

use flaremon_api::models::Zone;

use crate::config::AuthCredentials;
use crate::model::{MonitoredResource, ServiceTier};

impl From<&Zone> for MonitoredResource {
    fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            tier: ServiceTier::from_plan(zone.plan.price, &zone.plan.legacy_id),
            plan_name: zone.plan.name.clone(),
        }
    }
}

impl From<&AuthCredentials> for flaremon_api::Credentials {
    fn from(auth: &AuthCredentials) -> Self {
        match auth {
            AuthCredentials::ApiToken(token) => Self::ApiToken(token.clone()),
            AuthCredentials::ApiKey { key, email } => Self::ApiKey {
                key: key.clone(),
                email: email.clone(),
            },
        }
    }
}
