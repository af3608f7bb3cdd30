use serde_json::Value;

use crate::error::FlattenError;
use crate::models::match_row::{MatchRow, Rune, Side};

/// A borrowed JSON node that remembers where it came from, so lookups can
/// report the full path of whatever is missing.
struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    fn root(value: &'a Value) -> Self {
        Node { value, path: String::new() }
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn get(&self, key: &str) -> Result<Node<'a>, FlattenError> {
        let map = self.value.as_object().ok_or_else(|| FlattenError::Malformed {
            path: self.path.clone(),
            expected: "an object",
        })?;
        let path = self.child_path(key);
        match map.get(key) {
            Some(value) => Ok(Node { value, path }),
            None => Err(FlattenError::MissingField { path }),
        }
    }

    fn at(&self, index: usize) -> Result<Node<'a>, FlattenError> {
        let items = self.value.as_array().ok_or_else(|| FlattenError::Malformed {
            path: self.path.clone(),
            expected: "an array",
        })?;
        let path = format!("{}[{}]", self.path, index);
        match items.get(index) {
            Some(value) => Ok(Node { value, path }),
            None => Err(FlattenError::MissingField { path }),
        }
    }

    fn int(&self) -> Result<i64, FlattenError> {
        self.value.as_i64().ok_or_else(|| self.malformed("an integer"))
    }

    fn text(&self) -> Result<&'a str, FlattenError> {
        self.value.as_str().ok_or_else(|| self.malformed("a string"))
    }

    fn flag(&self) -> Result<bool, FlattenError> {
        self.value.as_bool().ok_or_else(|| self.malformed("a boolean"))
    }

    fn strings(&self) -> Result<Vec<String>, FlattenError> {
        let items = self.value.as_array().ok_or_else(|| self.malformed("an array"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| FlattenError::Malformed {
                    path: format!("{}[{}]", self.path, i),
                    expected: "a string",
                })
            })
            .collect()
    }

    fn malformed(&self, expected: &'static str) -> FlattenError {
        FlattenError::Malformed {
            path: self.path.clone(),
            expected,
        }
    }
}

/// Flattens one match-v5 record into the row for `puuid`.
///
/// Every field is required except `riotIdTagline`, which falls back to an
/// empty string. The first missing or mistyped field aborts the whole row.
pub fn flatten(record: &Value, puuid: &str) -> Result<MatchRow, FlattenError> {
    let root = Node::root(record);
    let info = root.get("info")?;
    let metadata = root.get("metadata")?;

    let match_id = metadata.get("matchId")?.text()?.to_string();
    let participants = metadata.get("participants")?.strings()?;
    let index = participants
        .iter()
        .position(|p| p == puuid)
        .ok_or_else(|| FlattenError::PlayerNotFound {
            puuid: puuid.to_string(),
        })?;
    let player = info.get("participants")?.at(index)?;

    let int = |key: &str| -> Result<i64, FlattenError> { player.get(key)?.int() };
    let text = |key: &str| -> Result<String, FlattenError> {
        Ok(player.get(key)?.text()?.to_string())
    };
    let flag = |key: &str| -> Result<bool, FlattenError> { player.get(key)?.flag() };

    let game_start_timestamp = info.get("gameStartTimestamp")?.int()?;
    let game_end = info.get("gameEndTimestamp")?;
    let game_end_timestamp = game_end.int()?;
    let played_ms = game_end_timestamp
        .checked_sub(game_start_timestamp)
        .ok_or_else(|| game_end.malformed("a timestamp within range of gameStartTimestamp"))?;

    let team_id = int("teamId")?;
    let side = Side::from_team_id(team_id).ok_or(FlattenError::UnknownTeam { team_id })?;

    let riot_tag = player
        .get("riotIdTagline")
        .ok()
        .and_then(|tag| tag.value.as_str())
        .unwrap_or_default()
        .to_string();

    let ally_jungle = int("totalAllyJungleMinionsKilled")?;
    let enemy_node = player.get("totalEnemyJungleMinionsKilled")?;
    let enemy_jungle = enemy_node.int()?;
    let neutral_jungle = ally_jungle
        .checked_add(enemy_jungle)
        .ok_or_else(|| enemy_node.malformed("a count that does not overflow"))?;

    let perks = player.get("perks")?;
    let styles = perks.get("styles")?;
    let primary = styles.at(0)?;
    let secondary = styles.at(1)?;
    let primary_selections = primary.get("selections")?;
    let secondary_selections = secondary.get("selections")?;
    let selection =
        |selections: &Node<'_>, i: usize| -> Result<Rune, FlattenError> {
            Ok(Rune::Id(selections.at(i)?.get("perk")?.int()?))
        };
    let stat_perks = perks.get("statPerks")?;
    let shard = |key: &str| -> Result<Rune, FlattenError> { Ok(Rune::Id(stat_perks.get(key)?.int()?)) };

    Ok(MatchRow {
        match_id,
        participants,
        game_creation: info.get("gameCreation")?.int()?,
        game_start_timestamp,
        game_end_timestamp,
        game_version: info.get("gameVersion")?.text()?.to_string(),
        queue_id: info.get("queueId")?.int()?,
        game_mode: info.get("gameMode")?.text()?.to_string(),
        platform_id: info.get("platformId")?.text()?.to_string(),
        puuid: text("puuid")?,
        riot_id: text("summonerName")?,
        riot_tag,
        time_played: played_ms as f64 / 1000.0,
        side,
        win: flag("win")?,
        team_position: text("teamPosition")?,
        lane: text("lane")?,
        champion: text("championName")?,
        kills: int("kills")?,
        deaths: int("deaths")?,
        assists: int("assists")?,
        summoner1_id: int("summoner1Id")?,
        summoner2_id: int("summoner2Id")?,
        gold_earned: int("goldEarned")?,
        total_minions_killed: int("totalMinionsKilled")?,
        total_neutral_minions_killed: neutral_jungle,
        total_ally_jungle_minions_killed: ally_jungle,
        total_enemy_jungle_minions_killed: enemy_jungle,
        early_surrender: flag("gameEndedInEarlySurrender")?,
        surrender: flag("gameEndedInSurrender")?,
        first_blood: flag("firstBloodKill")?,
        first_blood_assist: flag("firstBloodAssist")?,
        first_tower: flag("firstTowerKill")?,
        first_tower_assist: flag("firstTowerAssist")?,
        damage_dealt_to_buildings: int("damageDealtToBuildings")?,
        turret_kills: int("turretKills")?,
        turrets_lost: int("turretsLost")?,
        damage_dealt_to_objectives: int("damageDealtToObjectives")?,
        dragon_kills: int("dragonKills")?,
        objectives_stolen: int("objectivesStolen")?,
        longest_time_spent_living: int("longestTimeSpentLiving")?,
        largest_killing_spree: int("largestKillingSpree")?,
        total_damage_dealt_champions: int("totalDamageDealtToChampions")?,
        total_damage_taken: int("totalDamageTaken")?,
        total_damage_self_mitigated: int("damageSelfMitigated")?,
        total_damage_shielded_teammates: int("totalDamageShieldedOnTeammates")?,
        total_heals_teammates: int("totalHealsOnTeammates")?,
        total_time_crowd_controlled: int("totalTimeCCDealt")?,
        total_time_spent_dead: int("totalTimeSpentDead")?,
        vision_score: int("visionScore")?,
        wards_killed: int("wardsKilled")?,
        wards_placed: int("wardsPlaced")?,
        control_wards_placed: int("detectorWardsPlaced")?,
        item0: int("item0")?,
        item1: int("item1")?,
        item2: int("item2")?,
        item3: int("item3")?,
        item4: int("item4")?,
        item5: int("item5")?,
        item6: int("item6")?,
        perk_keystone: selection(&primary_selections, 0)?,
        perk_primary_row_1: selection(&primary_selections, 1)?,
        perk_primary_row_2: selection(&primary_selections, 2)?,
        perk_primary_row_3: selection(&primary_selections, 3)?,
        perk_secondary_row_1: selection(&secondary_selections, 0)?,
        perk_secondary_row_2: selection(&secondary_selections, 1)?,
        perk_primary_style: Rune::Id(primary.get("style")?.int()?),
        perk_secondary_style: Rune::Id(secondary.get("style")?.int()?),
        perk_shard_defense: shard("defense")?,
        perk_shard_flex: shard("flex")?,
        perk_shard_offense: shard("offense")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BLUE: &str = "puuid-blue-player";
    const RED: &str = "puuid-red-player";

    fn sample() -> Value {
        serde_json::from_str(include_str!("../tests/fixtures/match.json")).unwrap()
    }

    fn participant_mut<'a>(record: &'a mut Value, index: usize) -> &'a mut serde_json::Map<String, Value> {
        record["info"]["participants"][index].as_object_mut().unwrap()
    }

    #[test]
    fn copies_participant_fields() {
        let record = sample();
        let row = flatten(&record, RED).unwrap();

        assert_eq!(row.match_id, "NA1_5216932918");
        assert_eq!(row.participants, vec![BLUE.to_string(), RED.to_string()]);
        assert_eq!(row.puuid, RED);
        assert_eq!(row.riot_id, "RedLaner");
        assert_eq!(row.riot_tag, "NA2");
        assert_eq!(row.side, Side::Red);
        assert!(!row.win);
        assert_eq!(row.champion, "Ahri");
        assert_eq!((row.kills, row.deaths, row.assists), (4, 7, 9));
        assert_eq!(row.gold_earned, 11250);
        assert_eq!(row.control_wards_placed, 3);
        assert_eq!(row.item6, 3364);
        assert_eq!(row.game_mode, "CLASSIC");
        assert_eq!(row.queue_id, 420);
    }

    #[test]
    fn derives_computed_fields() {
        let record = sample();
        let row = flatten(&record, BLUE).unwrap();

        assert_eq!(row.side, Side::Blue);
        assert_eq!(row.total_ally_jungle_minions_killed, 120);
        assert_eq!(row.total_enemy_jungle_minions_killed, 14);
        assert_eq!(row.total_neutral_minions_killed, 134);
        assert_eq!(row.time_played, 1834.5);
    }

    #[test]
    fn jungle_total_overflow_fails_the_row() {
        let mut record = sample();
        let player = participant_mut(&mut record, 0);
        player.insert("totalAllyJungleMinionsKilled".into(), json!(i64::MAX));
        player.insert("totalEnemyJungleMinionsKilled".into(), json!(1));

        assert_eq!(
            flatten(&record, BLUE).unwrap_err(),
            FlattenError::Malformed {
                path: "info.participants[0].totalEnemyJungleMinionsKilled".into(),
                expected: "a count that does not overflow"
            }
        );
    }

    #[test]
    fn duration_overflow_fails_the_row() {
        let mut record = sample();
        record["info"]["gameEndTimestamp"] = json!(i64::MAX);
        record["info"]["gameStartTimestamp"] = json!(-1);

        assert_eq!(
            flatten(&record, BLUE).unwrap_err(),
            FlattenError::Malformed {
                path: "info.gameEndTimestamp".into(),
                expected: "a timestamp within range of gameStartTimestamp"
            }
        );
    }

    #[test]
    fn reads_perk_paths() {
        let record = sample();
        let row = flatten(&record, BLUE).unwrap();

        assert_eq!(row.perk_keystone, Rune::Id(8010));
        assert_eq!(row.perk_primary_row_1, Rune::Id(9111));
        assert_eq!(row.perk_primary_row_2, Rune::Id(9104));
        assert_eq!(row.perk_primary_row_3, Rune::Id(8299));
        assert_eq!(row.perk_secondary_row_1, Rune::Id(8444));
        assert_eq!(row.perk_secondary_row_2, Rune::Id(8242));
        assert_eq!(row.perk_primary_style, Rune::Id(8000));
        assert_eq!(row.perk_secondary_style, Rune::Id(8400));
        assert_eq!(row.perk_shard_defense, Rune::Id(5001));
        assert_eq!(row.perk_shard_flex, Rune::Id(5008));
        assert_eq!(row.perk_shard_offense, Rune::Id(5005));
    }

    #[test]
    fn unknown_player_is_not_found() {
        let err = flatten(&sample(), "someone-else").unwrap_err();
        assert_eq!(
            err,
            FlattenError::PlayerNotFound {
                puuid: "someone-else".into()
            }
        );
    }

    #[test]
    fn missing_required_field_aborts_the_row() {
        let mut record = sample();
        participant_mut(&mut record, 1).remove("goldEarned");

        assert_eq!(
            flatten(&record, RED).unwrap_err(),
            FlattenError::MissingField {
                path: "info.participants[1].goldEarned".into()
            }
        );
        // the other participant is untouched
        assert!(flatten(&record, BLUE).is_ok());
    }

    #[test]
    fn missing_nested_perk_reports_its_path() {
        let mut record = sample();
        record["info"]["participants"][0]["perks"]["styles"][1]["selections"]
            .as_array_mut()
            .unwrap()
            .truncate(1);

        assert_eq!(
            flatten(&record, BLUE).unwrap_err(),
            FlattenError::MissingField {
                path: "info.participants[0].perks.styles[1].selections[1]".into()
            }
        );
    }

    #[test]
    fn wrong_type_is_malformed() {
        let mut record = sample();
        participant_mut(&mut record, 0).insert("kills".into(), json!("seven"));

        assert_eq!(
            flatten(&record, BLUE).unwrap_err(),
            FlattenError::Malformed {
                path: "info.participants[0].kills".into(),
                expected: "an integer"
            }
        );
    }

    #[test]
    fn tagline_falls_back_to_empty() {
        let mut record = sample();
        participant_mut(&mut record, 0).remove("riotIdTagline");

        let row = flatten(&record, BLUE).unwrap();
        assert_eq!(row.riot_tag, "");
    }

    #[test]
    fn unknown_team_id_is_rejected() {
        let mut record = sample();
        participant_mut(&mut record, 0).insert("teamId".into(), json!(300));

        assert_eq!(
            flatten(&record, BLUE).unwrap_err(),
            FlattenError::UnknownTeam { team_id: 300 }
        );
    }

    #[test]
    fn participant_list_shorter_than_metadata() {
        let mut record = sample();
        record["info"]["participants"].as_array_mut().unwrap().pop();

        assert_eq!(
            flatten(&record, RED).unwrap_err(),
            FlattenError::MissingField {
                path: "info.participants[1]".into()
            }
        );
    }

    #[test]
    fn non_object_record_is_malformed() {
        assert_eq!(
            flatten(&json!([1, 2, 3]), BLUE).unwrap_err(),
            FlattenError::Malformed {
                path: String::new(),
                expected: "an object"
            }
        );
    }
}
