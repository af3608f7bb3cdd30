use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::{ApiKey, TOKEN_HEADER};
use crate::config::ApiConfig;
use crate::error::RiotError;

const USER_AGENT: &str = concat!("lol-match-stats/", env!("CARGO_PKG_VERSION"));

/// Base URLs for the two kinds of Riot routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hosts {
    /// Regional host (account-v1, match-v5), e.g. `https://americas.api.riotgames.com`.
    pub regional: String,
    /// Platform host (summoner-v4, league-v4), e.g. `https://na1.api.riotgames.com`.
    pub platform: String,
}

/// Where the perk and perk-style name catalogs are downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUrls {
    pub perks: String,
    pub perk_styles: String,
}

impl Default for CatalogUrls {
    fn default() -> Self {
        CatalogUrls {
            perks: "https://raw.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/v1/perks.json".to_string(),
            perk_styles: "https://raw.communitydragon.org/latest/plugins/rcp-be-lol-game-data/global/default/v1/perkstyles.json".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct RiotClient {
    pub(crate) http: Client,
    pub(crate) token: HeaderValue,
    pub(crate) hosts: Hosts,
    pub(crate) catalogs: CatalogUrls,
}

impl RiotClient {
    pub fn new(api_key: &ApiKey, hosts: Hosts) -> Result<Self, RiotError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            token: api_key.header_value()?,
            hosts: trim_hosts(hosts),
            catalogs: CatalogUrls::default(),
        })
    }

    /// Builds a client from config, reading the key from the configured
    /// environment variable.
    pub fn from_config(config: &ApiConfig) -> Result<Self, RiotError> {
        let api_key = ApiKey::from_env(&config.key_var)?;
        Ok(Self::new(&api_key, config.hosts.clone())?.with_catalogs(config.catalogs.clone()))
    }

    pub fn with_catalogs(mut self, catalogs: CatalogUrls) -> Self {
        self.catalogs = catalogs;
        self
    }

    pub fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    pub(crate) fn regional_url(&self, path: &str) -> String {
        format!("{}{}", self.hosts.regional, path)
    }

    pub(crate) fn platform_url(&self, path: &str) -> String {
        format!("{}{}", self.hosts.platform, path)
    }

    /// GETs a Riot API resource with the token header and decodes the body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RiotError> {
        let resp = self
            .http
            .get(url)
            .header(TOKEN_HEADER, self.token.clone())
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }
}

fn trim_hosts(hosts: Hosts) -> Hosts {
    Hosts {
        regional: hosts.regional.trim_end_matches('/').to_string(),
        platform: hosts.platform.trim_end_matches('/').to_string(),
    }
}

/// Maps non-success responses to `RiotError`.
pub(crate) async fn check_status(resp: Response) -> Result<Response, RiotError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    match status {
        StatusCode::NOT_FOUND => Err(RiotError::NotFound),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RiotError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            Err(RiotError::RateLimited { retry_after })
        }
        _ => {
            let body = resp.text().await.unwrap_or_default();
            Err(RiotError::ApiError {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Riot wraps errors as `{"status": {"message": ..., "status_code": ...}}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["status"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
