use std::{
    path::Path,
    time::{Duration, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::TokenResponse;

/// Token bundle persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds; `None` when the provider did not say.
    #[serde(default)]
    pub expires_at: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".into()
}

fn now() -> Result<Duration> {
    UNIX_EPOCH
        .elapsed()
        .with_context(|| "Time went backwards!")
}

impl Credential {
    pub fn from_token(token: TokenResponse) -> Result<Self> {
        let expires_at = match token.expires_in {
            None => None,
            Some(secs) => Some((now()? + Duration::from_secs(secs)).as_secs()),
        };

        Ok(Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
            scope: token.scope,
            token_type: token.token_type.unwrap_or_else(default_token_type),
        })
    }

    /// A credential without an expiry is assumed to be usable.
    pub fn is_valid(&self) -> Result<bool> {
        let exp = match self.expires_at {
            None => return Ok(true),
            Some(e) => Duration::from_secs(e),
        };

        Ok(now()? < exp)
    }

    /// Applies a refresh grant. Google omits the refresh token on refresh, so
    /// the old one is kept unless a new one is issued.
    pub fn refreshed(mut self, token: TokenResponse) -> Result<Self> {
        let refresh_token = self.refresh_token.take();
        let mut c = Self::from_token(token)?;

        if c.refresh_token.is_none() {
            c.refresh_token = refresh_token;
        }
        if c.scope.is_none() {
            c.scope = self.scope;
        }

        Ok(c)
    }

    pub fn auth_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read token file '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Token file '{}' is not a valid credential", path.display()))
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Could not write token file '{}'", path.display()))
    }
}
