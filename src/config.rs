use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use crate::client::{CatalogUrls, Hosts};
use crate::error::ConfigError;
use crate::region::{Platform, Region};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "LOL_STATS_CONFIG";

const DEFAULT_KEY_VAR: &str = "riot_API_key";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    api: FileApiConfig,
    server: FileServerConfig,
    log: FileLogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileApiConfig {
    key_var: String,
    region: Option<String>,
    platform: String,
    regional_host: Option<String>,
    platform_host: Option<String>,
    perks_url: String,
    perk_styles_url: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        let catalogs = CatalogUrls::default();
        FileApiConfig {
            key_var: DEFAULT_KEY_VAR.to_string(),
            region: None,
            platform: Platform::Na1.to_string(),
            regional_host: None,
            platform_host: None,
            perks_url: catalogs.perks,
            perk_styles_url: catalogs.perk_styles,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileServerConfig {
    bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        FileServerConfig {
            bind: "127.0.0.1:9922".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileLogConfig {
    level: String,
    json_path: Option<String>,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        FileLogConfig {
            level: "info".to_string(),
            json_path: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Name of the environment variable holding the API key.
    pub key_var: String,
    pub region: Region,
    pub platform: Platform,
    pub hosts: Hosts,
    pub catalogs: CatalogUrls,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub json_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: FileConfig = toml::from_str(s)?;
        build_config(cfg)
    }
}

/// Loads the config from `$LOL_STATS_CONFIG`, else from the user config
/// directory, else falls back to the built-in defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return load_config_from(&expand_tilde(&path));
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_config_from(&path),
        _ => build_config(FileConfig::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::from_toml_str(&s)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lol-match-stats").join("config.toml"))
}

fn build_config(cfg: FileConfig) -> Result<AppConfig, ConfigError> {
    Ok(AppConfig {
        api: build_api_config(cfg.api)?,
        server: build_server_config(cfg.server)?,
        log: LogConfig {
            level: cfg.log.level,
            json_path: cfg.log.json_path.as_deref().map(expand_tilde),
        },
    })
}

fn build_api_config(api: FileApiConfig) -> Result<ApiConfig, ConfigError> {
    if api.key_var.trim().is_empty() {
        return Err(ConfigError::Invalid("api.key_var must not be empty".into()));
    }

    let platform: Platform = api.platform.parse()?;
    let region = match &api.region {
        Some(region) => region.parse()?,
        None => platform.region(),
    };

    let hosts = Hosts {
        regional: api.regional_host.unwrap_or_else(|| region.base_url()),
        platform: api.platform_host.unwrap_or_else(|| platform.base_url()),
    };

    Ok(ApiConfig {
        key_var: api.key_var,
        region,
        platform,
        hosts,
        catalogs: CatalogUrls {
            perks: api.perks_url,
            perk_styles: api.perk_styles_url,
        },
    })
}

fn build_server_config(server: FileServerConfig) -> Result<ServerConfig, ConfigError> {
    let bind = server
        .bind
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("server.bind is not an address: {}", server.bind)))?;
    Ok(ServerConfig { bind })
}

fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
