use serde::{Serialize, Serializer};

use crate::lookup::LookupTable;

/// Team side, derived from the match-v5 `teamId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn from_team_id(team_id: i64) -> Option<Self> {
        match team_id {
            100 => Some(Side::Blue),
            200 => Some(Side::Red),
            _ => None,
        }
    }
}

/// A perk or perk-style slot: the raw numeric id until a lookup table names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rune {
    Id(i64),
    Name(String),
}

impl Rune {
    /// Replaces the id with its name when the table knows it.
    pub fn rename(&mut self, table: &LookupTable) {
        if let Rune::Id(id) = self {
            if let Some(name) = table.name(*id) {
                *self = Rune::Name(name.to_string());
            }
        }
    }
}

/// One player's view of one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    pub match_id: String,
    #[serde(serialize_with = "join_participants")]
    pub participants: Vec<String>,
    pub game_creation: i64,
    pub game_start_timestamp: i64,
    pub game_end_timestamp: i64,
    pub game_version: String,
    pub queue_id: i64,
    pub game_mode: String,
    pub platform_id: String,
    pub puuid: String,
    pub riot_id: String,
    pub riot_tag: String,
    /// Seconds between game start and game end.
    pub time_played: f64,
    pub side: Side,
    pub win: bool,
    pub team_position: String,
    pub lane: String,
    pub champion: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub summoner1_id: i64,
    pub summoner2_id: i64,
    pub gold_earned: i64,
    pub total_minions_killed: i64,
    /// Ally plus enemy jungle minions.
    pub total_neutral_minions_killed: i64,
    pub total_ally_jungle_minions_killed: i64,
    pub total_enemy_jungle_minions_killed: i64,
    pub early_surrender: bool,
    pub surrender: bool,
    pub first_blood: bool,
    pub first_blood_assist: bool,
    pub first_tower: bool,
    pub first_tower_assist: bool,
    pub damage_dealt_to_buildings: i64,
    pub turret_kills: i64,
    pub turrets_lost: i64,
    pub damage_dealt_to_objectives: i64,
    pub dragon_kills: i64,
    pub objectives_stolen: i64,
    pub longest_time_spent_living: i64,
    pub largest_killing_spree: i64,
    pub total_damage_dealt_champions: i64,
    pub total_damage_taken: i64,
    pub total_damage_self_mitigated: i64,
    pub total_damage_shielded_teammates: i64,
    pub total_heals_teammates: i64,
    pub total_time_crowd_controlled: i64,
    pub total_time_spent_dead: i64,
    pub vision_score: i64,
    pub wards_killed: i64,
    pub wards_placed: i64,
    pub control_wards_placed: i64,
    pub item0: i64,
    pub item1: i64,
    pub item2: i64,
    pub item3: i64,
    pub item4: i64,
    pub item5: i64,
    pub item6: i64,
    pub perk_keystone: Rune,
    pub perk_primary_row_1: Rune,
    pub perk_primary_row_2: Rune,
    pub perk_primary_row_3: Rune,
    pub perk_secondary_row_1: Rune,
    pub perk_secondary_row_2: Rune,
    pub perk_primary_style: Rune,
    pub perk_secondary_style: Rune,
    pub perk_shard_defense: Rune,
    pub perk_shard_flex: Rune,
    pub perk_shard_offense: Rune,
}

impl MatchRow {
    /// Names the perk slots with `perks` and the two style slots with `styles`.
    pub fn rename_perks(&mut self, perks: &LookupTable, styles: &LookupTable) {
        for slot in [
            &mut self.perk_keystone,
            &mut self.perk_primary_row_1,
            &mut self.perk_primary_row_2,
            &mut self.perk_primary_row_3,
            &mut self.perk_secondary_row_1,
            &mut self.perk_secondary_row_2,
            &mut self.perk_shard_defense,
            &mut self.perk_shard_flex,
            &mut self.perk_shard_offense,
        ] {
            slot.rename(perks);
        }
        self.perk_primary_style.rename(styles);
        self.perk_secondary_style.rename(styles);
    }
}

fn join_participants<S: Serializer>(participants: &[String], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&participants.join(","))
}
