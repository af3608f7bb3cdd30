use tracing::info;
use urlencoding::encode;

use crate::client::RiotClient;
use crate::error::RiotError;
use crate::models::account::{RiotAccount, Summoner};

impl RiotClient {
    /// Resolve Riot ID (game name + tag line) → PUUID.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn puuid_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<String, RiotError> {
        let account = self.account_by_riot_id(game_name, tag_line).await?;
        info!(game_name, tag_line, puuid = %account.puuid, "Resolved Riot ID");
        Ok(account.puuid)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<RiotAccount, RiotError> {
        let url = self.regional_url(&format!(
            "/riot/account/v1/accounts/by-riot-id/{}/{}",
            encode(game_name),
            encode(tag_line)
        ));
        self.get_json(&url).await
    }

    /// Resolve an encrypted summoner id → PUUID via summoner-v4.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn puuid_by_summoner_id(&self, summoner_id: &str) -> Result<String, RiotError> {
        let url = self.platform_url(&format!("/lol/summoner/v4/summoners/{}", encode(summoner_id)));
        let summoner: Summoner = self.get_json(&url).await?;
        Ok(summoner.puuid)
    }

    /// PUUID → game name + tag line
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn account_by_puuid(&self, puuid: &str) -> Result<RiotAccount, RiotError> {
        let url = self.regional_url(&format!("/riot/account/v1/accounts/by-puuid/{}", encode(puuid)));
        self.get_json(&url).await
    }
}
