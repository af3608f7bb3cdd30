use tracing::info;

use crate::client::RiotClient;
use crate::error::RiotError;
use crate::models::league::{ApexTier, LadderEntry, LeagueList};

/// Solo queue always has exactly this many challengers.
pub const CHALLENGER_SEATS: usize = 300;
/// Challenger plus grandmaster seats; beyond this the master league is needed.
pub const GRANDMASTER_CUTOFF: usize = 1000;

const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

impl RiotClient {
    /// Get the solo-queue league list for one apex tier
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn apex_league(&self, tier: ApexTier) -> Result<LeagueList, RiotError> {
        let url = self.platform_url(&format!(
            "/lol/league/v4/{}/by-queue/{}",
            tier.path_segment(),
            SOLO_QUEUE
        ));
        let league: LeagueList = self.get_json(&url).await?;
        info!(?tier, entries = league.entries.len(), "Fetched league");
        Ok(league)
    }

    pub async fn challenger_league(&self) -> Result<LeagueList, RiotError> {
        self.apex_league(ApexTier::Challenger).await
    }

    pub async fn grandmaster_league(&self) -> Result<LeagueList, RiotError> {
        self.apex_league(ApexTier::Grandmaster).await
    }

    pub async fn master_league(&self) -> Result<LeagueList, RiotError> {
        self.apex_league(ApexTier::Master).await
    }

    /// The top `top` solo-queue players. Grandmaster is only fetched past the
    /// challenger seats, master only past the grandmaster cutoff.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn ladder(&self, top: usize) -> Result<Vec<LadderEntry>, RiotError> {
        let mut tiers = vec![(ApexTier::Challenger, self.challenger_league().await?)];
        if top > CHALLENGER_SEATS {
            tiers.push((ApexTier::Grandmaster, self.grandmaster_league().await?));
        }
        if top > GRANDMASTER_CUTOFF {
            tiers.push((ApexTier::Master, self.master_league().await?));
        }
        Ok(build_ladder(tiers, top))
    }
}

/// Sorts each tier by league points (highest first), concatenates the tiers
/// in the order given, keeps the first `top` and numbers them from 1.
pub fn build_ladder(tiers: Vec<(ApexTier, LeagueList)>, top: usize) -> Vec<LadderEntry> {
    tiers
        .into_iter()
        .flat_map(|(tier, league)| {
            let mut entries = league.entries;
            entries.sort_by(|a, b| b.league_points.cmp(&a.league_points));
            entries.into_iter().map(move |entry| (tier, entry))
        })
        .take(top)
        .enumerate()
        .map(|(i, (tier, entry))| LadderEntry {
            rank: i + 1,
            tier,
            entry,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::league::LeagueEntry;

    fn entry(puuid: &str, lp: i32) -> LeagueEntry {
        LeagueEntry {
            summoner_id: None,
            puuid: Some(puuid.to_string()),
            league_points: lp,
            division: "I".to_string(),
            wins: 100,
            losses: 80,
            veteran: false,
            inactive: false,
            fresh_blood: false,
            hot_streak: false,
        }
    }

    fn league(tier: &str, entries: Vec<LeagueEntry>) -> LeagueList {
        LeagueList {
            league_id: None,
            tier: tier.to_string(),
            queue: SOLO_QUEUE.to_string(),
            name: None,
            entries,
        }
    }

    #[test]
    fn sorts_within_each_tier_and_ranks_across_tiers() {
        let tiers = vec![
            (
                ApexTier::Challenger,
                league("CHALLENGER", vec![entry("c1", 900), entry("c2", 1400)]),
            ),
            (
                ApexTier::Grandmaster,
                league("GRANDMASTER", vec![entry("g1", 500), entry("g2", 700)]),
            ),
        ];

        let ladder = build_ladder(tiers, 10);
        let order: Vec<_> = ladder
            .iter()
            .map(|e| (e.rank, e.tier, e.entry.puuid.as_deref().unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, ApexTier::Challenger, "c2"),
                (2, ApexTier::Challenger, "c1"),
                (3, ApexTier::Grandmaster, "g2"),
                (4, ApexTier::Grandmaster, "g1"),
            ]
        );
    }

    #[test]
    fn truncates_to_top() {
        let tiers = vec![(
            ApexTier::Challenger,
            league("CHALLENGER", (0..5).map(|i| entry(&format!("p{i}"), i * 10)).collect()),
        )];

        let ladder = build_ladder(tiers, 2);
        assert_eq!(ladder.len(), 2);
        assert_eq!(ladder[0].entry.league_points, 40);
        assert_eq!(ladder[1].rank, 2);
    }

    #[test]
    fn serializes_overall_rank_and_division_separately() {
        let ladder = build_ladder(
            vec![(ApexTier::Challenger, league("CHALLENGER", vec![entry("c1", 1)]))],
            1,
        );
        let json = serde_json::to_value(&ladder[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["division"], "I");
        assert_eq!(json["tier"], "CHALLENGER");
        assert_eq!(json["leaguePoints"], 1);
    }
}
