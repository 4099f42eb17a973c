use tracing::{info, warn};

use crate::{
    config::{Settings, FOLDER_ID},
    credentials,
    google_drive::{oauth, Credential, Drive, UploadFile},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uploaded {
    pub link: String,
}

/// Uploads `file` into the fixed destination folder. One attempt, no retry.
pub async fn upload(
    settings: &Settings,
    drive: &Drive,
    credential: Credential,
    file: &UploadFile,
) -> anyhow::Result<Uploaded> {
    let credential = fresh(settings, credential).await;

    info!(name = %file.name, size = file.size(), mime = %file.mime_type, "uploading");
    let f = drive.create_file(&credential, file, FOLDER_ID).await?;
    info!(id = %f.id, "upload finished");

    Ok(Uploaded { link: f.link() })
}

/// Refreshes an expired credential once when a refresh token is at hand.
/// Falls back to the stored credential on any failure; the upload call
/// then reports whatever the API says.
async fn fresh(settings: &Settings, credential: Credential) -> Credential {
    if credential.refresh_token.is_none() || credential.is_valid().unwrap_or(true) {
        return credential;
    }

    let secret = match credentials::read_secret(settings).await {
        Ok(s) => s,
        Err(e) => {
            warn!("cannot refresh expired credential: {e:#}");
            return credential;
        }
    };

    match oauth::refresh(&secret, credential.clone()).await {
        Ok(c) => {
            if let Err(e) = c.write(&settings.token_file).await {
                warn!("could not store refreshed credential: {e:#}");
            }
            info!("refreshed expired credential");
            c
        }
        Err(e) => {
            warn!("credential refresh failed: {e:#}");
            credential
        }
    }
}

#[cfg(test)]
mod tests {
    use httptest::{matchers::*, responders::*, Expectation, Server};

    use super::*;

    fn credential(expires_at: Option<u64>) -> Credential {
        Credential {
            access_token: "ya29.stored".into(),
            refresh_token: Some("1//refresh".into()),
            expires_at,
            scope: None,
            token_type: "Bearer".into(),
        }
    }

    #[tokio::test]
    async fn uploads_into_fixed_folder() -> anyhow::Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/upload"),
                request::headers(contains(("authorization", "Bearer ya29.stored"))),
                request::body(matches(format!(
                    "\\{{\"name\":\"photo.jpg\",\"parents\":\\[\"{FOLDER_ID}\"\\]\\}}"
                ))),
            ])
            .respond_with(json_encoded(serde_json::json!({ "id": "1new" }))),
        );

        let dir = tempfile::tempdir()?;
        let settings = Settings::in_dir(dir.path());
        let drive = Drive::new(server.url_str("/upload"));
        let file = UploadFile::new("photo.jpg", Some("image/jpeg"), b"not quite a jpeg".repeat(128));

        let up = upload(&settings, &drive, credential(None), &file).await?;
        assert_eq!(
            up,
            Uploaded {
                link: "https://drive.google.com/file/d/1new".into(),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_credential_is_refreshed_first() -> anyhow::Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/token"),
                request::body(url_decoded(contains(("grant_type", "refresh_token")))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "access_token": "ya29.fresh",
                "expires_in": 3599,
            }))),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/upload"),
                request::headers(contains(("authorization", "Bearer ya29.fresh"))),
            ])
            .respond_with(json_encoded(serde_json::json!({ "id": "1new" }))),
        );

        let dir = tempfile::tempdir()?;
        let settings = Settings::in_dir(dir.path());
        std::fs::write(
            &settings.credentials_file,
            serde_json::json!({
                "installed": {
                    "client_id": "id",
                    "client_secret": "secret",
                    "token_uri": server.url_str("/token"),
                }
            })
            .to_string(),
        )?;

        let drive = Drive::new(server.url_str("/upload"));
        let file = UploadFile::new("a.txt", Some("text/plain"), b"abc".to_vec());

        upload(&settings, &drive, credential(Some(1)), &file).await?;

        let stored = Credential::read(&settings.token_file).await?;
        assert_eq!(stored.access_token, "ya29.fresh");
        assert_eq!(stored.refresh_token.as_deref(), Some("1//refresh"));

        Ok(())
    }

    #[tokio::test]
    async fn api_failure_is_an_error() -> anyhow::Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/upload")).respond_with(
                http::Response::builder()
                    .status(500)
                    .body("backend error".to_string())
                    .unwrap(),
            ),
        );

        let dir = tempfile::tempdir()?;
        let settings = Settings::in_dir(dir.path());
        let drive = Drive::new(server.url_str("/upload"));
        let file = UploadFile::new("a.txt", Some("text/plain"), b"abc".to_vec());

        let e = upload(&settings, &drive, credential(None), &file)
            .await
            .unwrap_err();
        assert!(e.to_string().contains("backend error"));

        Ok(())
    }
}
