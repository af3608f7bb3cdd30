use serde::{Deserialize, Serialize};

/// The apex tiers that league-v4 serves as a single list each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApexTier {
    Challenger,
    Grandmaster,
    Master,
}

impl ApexTier {
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            ApexTier::Challenger => "challengerleagues",
            ApexTier::Grandmaster => "grandmasterleagues",
            ApexTier::Master => "masterleagues",
        }
    }
}

/// league-v4 `LeagueListDTO`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueList {
    #[serde(rename = "leagueId")]
    pub league_id: Option<String>,
    pub tier: String,
    pub queue: String,
    pub name: Option<String>,
    pub entries: Vec<LeagueEntry>,
}

/// league-v4 `LeagueItemDTO`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueEntry {
    #[serde(rename = "summonerId")]
    pub summoner_id: Option<String>,
    pub puuid: Option<String>,
    #[serde(rename = "leaguePoints")]
    pub league_points: i32,
    /// Division within the tier ("I" for apex tiers).
    #[serde(rename(deserialize = "rank", serialize = "division"))]
    pub division: String,
    pub wins: i32,
    pub losses: i32,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub inactive: bool,
    #[serde(rename = "freshBlood", default)]
    pub fresh_blood: bool,
    #[serde(rename = "hotStreak", default)]
    pub hot_streak: bool,
}

/// A league entry placed on the combined solo-queue ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LadderEntry {
    /// 1-based position across all fetched tiers.
    pub rank: usize,
    pub tier: ApexTier,
    #[serde(flatten)]
    pub entry: LeagueEntry,
}
