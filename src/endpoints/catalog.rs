use serde_json::Value;
use tracing::info;

use crate::client::{check_status, RiotClient};
use crate::error::RiotError;
use crate::lookup::LookupTable;

impl RiotClient {
    /// Download a static catalog document. These live on public CDNs, so no
    /// token is sent.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn catalog(&self, url: &str) -> Result<Value, RiotError> {
        let resp = self.http.get(url).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }

    /// Builds the `(perks, perk styles)` name tables from the configured catalogs.
    pub async fn perk_tables(&self) -> Result<(LookupTable, LookupTable), RiotError> {
        let perks = LookupTable::from_catalog(&self.catalog(&self.catalogs.perks).await?)?;
        let styles = LookupTable::from_catalog(&self.catalog(&self.catalogs.perk_styles).await?)?;
        info!(perks = perks.len(), styles = styles.len(), "Loaded perk catalogs");
        Ok((perks, styles))
    }
}
