use anyhow::Context;
use reqwest::Url;

use crate::google_drive::{types::*, HTTP};

/// Out-of-band redirect: the consent page shows the code for the user to paste.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Consent URL for the installed-app flow. `prompt=consent` makes Google
/// issue a refresh token on every authorization.
pub fn auth_url<T: AsRef<str>>(secret: &ClientSecret, scopes: &[T]) -> anyhow::Result<String> {
    let scope = scopes
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    let url = Url::parse_with_params(
        &secret.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", secret.client_id.as_str()),
            ("redirect_uri", OOB_REDIRECT_URI),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .with_context(|| format!("invalid auth_uri '{}'", secret.auth_uri))?;

    Ok(url.into())
}

pub async fn exchange_code(secret: &ClientSecret, code: &str) -> anyhow::Result<Credential> {
    let token = Res::from(
        HTTP.post(&secret.token_uri)
            .form(&[
                ("code", code),
                ("client_id", secret.client_id.as_str()),
                ("client_secret", secret.client_secret.as_str()),
                ("redirect_uri", OOB_REDIRECT_URI),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .with_context(|| format!("Could not send post request to '{}'", secret.token_uri))?,
    )
    .json::<TokenResponse>()
    .await?;

    Credential::from_token(token)
}

pub async fn refresh(secret: &ClientSecret, credential: Credential) -> anyhow::Result<Credential> {
    let refresh_token = credential
        .refresh_token
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("credential has no refresh token"))?;

    let token = Res::from(
        HTTP.post(&secret.token_uri)
            .form(&[
                ("client_id", secret.client_id.as_str()),
                ("client_secret", secret.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .with_context(|| format!("Could not send post request to '{}'", secret.token_uri))?,
    )
    .json::<TokenResponse>()
    .await?;

    credential.refreshed(token)
}
