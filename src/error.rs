#[derive(thiserror::Error, Debug)]
pub enum RiotError {
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),
    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Riot API rejected the API key")]
    Unauthorized,
    #[error("Resource not found")]
    NotFound,
    #[error("Rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Could not flatten match: {0}")]
    Flatten(#[from] FlattenError),
    #[error("Could not build lookup table: {0}")]
    Lookup(#[from] LookupError),
}

/// Why a match record could not be turned into a row.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("player {puuid} is not a participant of this match")]
    PlayerNotFound { puuid: String },
    #[error("missing field `{path}`")]
    MissingField { path: String },
    #[error("field `{path}` is not {expected}")]
    Malformed { path: String, expected: &'static str },
    #[error("unknown team id {team_id}")]
    UnknownTeam { team_id: i64 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("catalog id {0} is not an integer")]
    BadId(serde_json::Value),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown region `{0}`")]
    UnknownRegion(String),
    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}
