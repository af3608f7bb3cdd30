use serde::{Deserialize, Serialize};

/// account-v1 `AccountDto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiotAccount {
    pub puuid: String,
    #[serde(rename = "gameName")]
    pub game_name: Option<String>,
    #[serde(rename = "tagLine")]
    pub tag_line: Option<String>,
}

/// The subset of summoner-v4 `SummonerDto` used to resolve a PUUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summoner {
    pub puuid: String,
    #[serde(rename = "summonerLevel")]
    pub summoner_level: Option<i64>,
    #[serde(rename = "profileIconId")]
    pub profile_icon_id: Option<i64>,
}
