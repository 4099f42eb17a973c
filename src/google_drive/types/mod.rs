mod credential;
mod drive_file;
mod secret;
mod upload;

pub use credential::Credential;
pub use drive_file::DriveFile;
pub use secret::ClientSecret;
pub use upload::UploadFile;

use anyhow::Context;
use reqwest::Response;
use serde::{de::DeserializeOwned, Deserialize};

/// Body of a successful `authorization_code` or `refresh_token` grant.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

pub struct Res(Response);

impl Res {
    /// Deserializes the body, turning any non-success status into an error
    /// that carries the provider's response text.
    pub async fn json<T: DeserializeOwned>(self) -> anyhow::Result<T> {
        let res = self.0;
        let status = res.status();

        if !status.is_success() {
            let text = res.text().await.with_context(|| "Could not get response")?;
            return Err(anyhow::anyhow!("GoogleAPIError {} {}", status, text));
        }

        let bytes = res
            .bytes()
            .await
            .with_context(|| "Could not get response")?;
        let t = serde_json::from_slice::<T>(&bytes)?;
        Ok(t)
    }
}

impl From<Response> for Res {
    fn from(r: Response) -> Self {
        Self(r)
    }
}
