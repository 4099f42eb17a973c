use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client registration as downloaded from the Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// The console wraps the registration in an `installed` or `web` key.
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum SecretFile {
    Installed(ClientSecret),
    Web(ClientSecret),
}

fn default_auth_uri() -> String {
    AUTH_URI.into()
}

fn default_token_uri() -> String {
    TOKEN_URI.into()
}

impl ClientSecret {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let f = serde_json::from_str::<SecretFile>(json)
            .with_context(|| "client secret must have an `installed` or `web` section")?;

        match f {
            SecretFile::Installed(s) | SecretFile::Web(s) => Ok(s),
        }
    }

    pub async fn read(path: &Path) -> anyhow::Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read client secret '{}'", path.display()))?;

        Self::parse(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::ClientSecret;

    #[test]
    fn parses_installed_section() -> anyhow::Result<()> {
        let s = ClientSecret::parse(
            r#"{"installed":{"client_id":"id.apps.googleusercontent.com","project_id":"p",
            "auth_uri":"https://accounts.google.com/o/oauth2/auth",
            "token_uri":"https://oauth2.googleapis.com/token",
            "client_secret":"shh","redirect_uris":["http://localhost"]}}"#,
        )?;

        assert_eq!(s.client_id, "id.apps.googleusercontent.com");
        assert_eq!(s.client_secret, "shh");
        assert_eq!(s.token_uri, "https://oauth2.googleapis.com/token");

        Ok(())
    }

    #[test]
    fn web_section_and_default_uris() -> anyhow::Result<()> {
        let s = ClientSecret::parse(r#"{"web":{"client_id":"a","client_secret":"b"}}"#)?;

        assert_eq!(s.auth_uri, "https://accounts.google.com/o/oauth2/auth");
        assert_eq!(s.token_uri, "https://oauth2.googleapis.com/token");

        Ok(())
    }

    #[test]
    fn rejects_unwrapped_secret() {
        let s = ClientSecret::parse(r#"{"client_id":"a","client_secret":"b"}"#);
        assert!(s.is_err());
    }
}
