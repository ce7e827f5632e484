// Zone listing endpoints
//
// `GET /zones` is paginated; every page is followed until `total_pages`
// is reached. Name filters are applied server-side, one listing per name.

use tracing::debug;

use crate::client::CloudflareClient;
use crate::error::Error;
use crate::models::Zone;

/// Page size used for zone listings (the API maximum is 50).
const ZONES_PER_PAGE: u32 = 50;

impl CloudflareClient {
    /// List the zones visible to the credentials.
    ///
    /// With an empty `names` slice every zone is returned; otherwise only
    /// zones whose name matches one of `names` exactly. Names that match
    /// nothing contribute nothing. The caller decides whether an empty
    /// overall result is an error.
    pub async fn list_zones(&self, names: &[String]) -> Result<Vec<Zone>, Error> {
        if names.is_empty() {
            return self.list_zones_filtered(None).await;
        }

        let mut zones = Vec::new();
        for name in names {
            zones.extend(self.list_zones_filtered(Some(name)).await?);
        }
        Ok(zones)
    }

    /// `GET /zones?page=N&per_page=50[&name=...]`, following pagination.
    async fn list_zones_filtered(&self, name: Option<&str>) -> Result<Vec<Zone>, Error> {
        let url = self.api_url("zones")?;
        let mut zones = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut query = vec![
                ("page", page.to_string()),
                ("per_page", ZONES_PER_PAGE.to_string()),
            ];
            if let Some(name) = name {
                query.push(("name", name.to_owned()));
            }

            let batch = self.get::<Vec<Zone>>(url.clone(), &query).await?;
            let fetched = batch.result.len();
            zones.extend(batch.result);

            let total_pages = batch.info.map_or(1, |info| info.total_pages);
            if fetched == 0 || page >= total_pages {
                break;
            }
            page += 1;
        }

        debug!(filter = name.unwrap_or("*"), count = zones.len(), "listed zones");
        Ok(zones)
    }
}
