//! Loading the stored credential, or walking the user through consent when
//! there is none.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::{
    config::{Settings, SCOPES},
    google_drive::{oauth, ClientSecret, Credential},
};

/// The client-secret file is absent. Nothing can proceed without it.
#[derive(Debug, thiserror::Error)]
#[error("{} not found!", .0.display())]
pub struct ConfigMissing(pub PathBuf);

/// The token file exists but could not be read back as a credential.
#[derive(Debug, thiserror::Error)]
#[error("stored credential '{}' is unusable", .0.display())]
pub struct TokenUnusable(pub PathBuf);

async fn exists(path: &Path) -> anyhow::Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Could not check for '{}'", path.display()))
}

#[derive(Debug)]
pub enum Authorization {
    /// A token file exists. Its contents are not checked for expiry or scope.
    Ready(Credential),
    /// No token yet; the user has to visit `url` and paste back the code.
    Pending { url: String, secret: ClientSecret },
}

pub async fn load(settings: &Settings) -> anyhow::Result<Authorization> {
    let token_file = &settings.token_file;

    if exists(token_file).await? {
        debug!(path = %token_file.display(), "loading stored credential");
        let c = Credential::read(token_file)
            .await
            .context(TokenUnusable(token_file.clone()))?;
        return Ok(Authorization::Ready(c));
    }

    let secret = read_secret(settings).await?;
    let url = oauth::auth_url(&secret, SCOPES)?;
    info!("no stored credential, presenting authorization url");

    Ok(Authorization::Pending { url, secret })
}

pub async fn read_secret(settings: &Settings) -> anyhow::Result<ClientSecret> {
    let path = &settings.credentials_file;

    if !exists(path).await? {
        return Err(ConfigMissing(path.clone()).into());
    }

    ClientSecret::read(path).await
}

/// Trades the pasted code for a credential and persists it.
pub async fn authorize(
    settings: &Settings,
    secret: &ClientSecret,
    code: &str,
) -> anyhow::Result<Credential> {
    let c = oauth::exchange_code(secret, code.trim()).await?;

    c.write(&settings.token_file).await?;
    info!(path = %settings.token_file.display(), "stored new credential");

    Ok(c)
}
