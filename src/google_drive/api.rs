use anyhow::Context;
use reqwest::header::*;

use crate::google_drive::{types::*, HTTP};

pub const UPLOAD_URI: &str = "https://www.googleapis.com/upload/drive/v3/files";

lazy_static::lazy_static! {
    static ref CREATE_FIELDS: String = DriveFile::fields().join(",");
}

/// Handle on the Drive v3 files collection.
#[derive(Debug, Clone)]
pub struct Drive {
    upload_uri: String,
}

impl Default for Drive {
    fn default() -> Self {
        Self::new(UPLOAD_URI)
    }
}

impl Drive {
    pub fn new(upload_uri: impl Into<String>) -> Self {
        Self {
            upload_uri: upload_uri.into(),
        }
    }

    /// `files.create` with a single multipart request.
    pub async fn create_file(
        &self,
        credential: &Credential,
        file: &UploadFile,
        parent_id: &str,
    ) -> anyhow::Result<DriveFile> {
        let boundary = format!("drive-drop-{}", uuid::Uuid::new_v4().simple());
        let body = file.multipart_body(parent_id, &boundary);

        let f = Res::from(
            HTTP.post(&self.upload_uri)
                .query(&[
                    ("uploadType", "multipart"),
                    ("fields", CREATE_FIELDS.as_str()),
                ])
                .header(AUTHORIZATION, credential.auth_header())
                .header(CONTENT_TYPE, UploadFile::content_type(&boundary))
                .header(CONTENT_LENGTH, body.len())
                .body(body)
                .send()
                .await
                .with_context(|| format!("Could not send POST request to `{}`", self.upload_uri))?,
        )
        .json::<DriveFile>()
        .await?;

        Ok(f)
    }
}
