use serde_json::Value;
use tracing::info;
use urlencoding::encode;

use crate::client::RiotClient;
use crate::error::RiotError;
use crate::table::MatchTable;

impl RiotClient {
    /// Get match ids for a player, most recent first
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn match_ids(&self, puuid: &str, start: u32, count: u32) -> Result<Vec<String>, RiotError> {
        let url = self.regional_url(&format!(
            "/lol/match/v5/matches/by-puuid/{}/ids?start={}&count={}",
            encode(puuid),
            start,
            count
        ));
        let ids: Vec<String> = self.get_json(&url).await?;
        info!(puuid, start, count, found = ids.len(), "Fetched match ids");
        Ok(ids)
    }

    /// Get the raw match-v5 record. The body is kept untyped; use
    /// [`crate::flatten::flatten`] to turn it into a row.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn match_by_id(&self, match_id: &str) -> Result<Value, RiotError> {
        let url = self.regional_url(&format!("/lol/match/v5/matches/{}", encode(match_id)));
        self.get_json(&url).await
    }

    /// Fetches a page of the player's history one match at a time and
    /// flattens every match that contains the player.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn match_table(&self, puuid: &str, start: u32, count: u32) -> Result<MatchTable, RiotError> {
        let ids = self.match_ids(puuid, start, count).await?;

        let mut table = MatchTable::new();
        for match_id in &ids {
            let record = self.match_by_id(match_id).await?;
            table.push_match(&record, puuid);
        }

        info!(puuid, matches = ids.len(), rows = table.len(), "Built match table");
        Ok(table)
    }
}
