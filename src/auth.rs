use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::RiotError;

/// Header carrying the developer or production key on every Riot API call.
pub const TOKEN_HEADER: &str = "X-Riot-Token";

/// A Riot API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into())
    }

    /// Reads the key from `var`, loading a `.env` file from the working
    /// directory (or its parents) first if one exists.
    pub fn from_env(var: &str) -> Result<Self, RiotError> {
        let key = dotenvy::var(var).map_err(|_| RiotError::MissingApiKey(var.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(RiotError::MissingApiKey(var.to_string()));
        }
        Ok(ApiKey(key.to_string()))
    }

    pub(crate) fn header_value(&self) -> Result<HeaderValue, RiotError> {
        let mut value = HeaderValue::from_str(&self.0).map_err(|_| RiotError::InvalidApiKey)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(5).collect();
        write!(f, "ApiKey({}…)", visible)
    }
}
