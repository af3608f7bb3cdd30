use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Regional routing value, used by account-v1 and match-v5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Sea => "sea",
        }
    }

    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "americas" => Ok(Region::Americas),
            "asia" => Ok(Region::Asia),
            "europe" => Ok(Region::Europe),
            "sea" => Ok(Region::Sea),
            _ => Err(ConfigError::UnknownRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform routing value, used by summoner-v4 and league-v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Me1,
    Na1,
    Oc1,
    Ph2,
    Ru,
    Sg2,
    Th2,
    Tr1,
    Tw2,
    Vn2,
}

const PLATFORMS: [Platform; 17] = [
    Platform::Br1,
    Platform::Eun1,
    Platform::Euw1,
    Platform::Jp1,
    Platform::Kr,
    Platform::La1,
    Platform::La2,
    Platform::Me1,
    Platform::Na1,
    Platform::Oc1,
    Platform::Ph2,
    Platform::Ru,
    Platform::Sg2,
    Platform::Th2,
    Platform::Tr1,
    Platform::Tw2,
    Platform::Vn2,
];

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Br1 => "br1",
            Platform::Eun1 => "eun1",
            Platform::Euw1 => "euw1",
            Platform::Jp1 => "jp1",
            Platform::Kr => "kr",
            Platform::La1 => "la1",
            Platform::La2 => "la2",
            Platform::Me1 => "me1",
            Platform::Na1 => "na1",
            Platform::Oc1 => "oc1",
            Platform::Ph2 => "ph2",
            Platform::Ru => "ru",
            Platform::Sg2 => "sg2",
            Platform::Th2 => "th2",
            Platform::Tr1 => "tr1",
            Platform::Tw2 => "tw2",
            Platform::Vn2 => "vn2",
        }
    }

    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    /// The regional route that serves this platform's matches and accounts.
    pub fn region(self) -> Region {
        match self {
            Platform::Br1 | Platform::La1 | Platform::La2 | Platform::Na1 => Region::Americas,
            Platform::Jp1 | Platform::Kr => Region::Asia,
            Platform::Eun1 | Platform::Euw1 | Platform::Me1 | Platform::Ru | Platform::Tr1 => {
                Region::Europe
            }
            Platform::Oc1
            | Platform::Ph2
            | Platform::Sg2
            | Platform::Th2
            | Platform::Tw2
            | Platform::Vn2 => Region::Sea,
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        PLATFORMS
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| ConfigError::UnknownPlatform(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
