use fievar::Fields;
use serde::Deserialize;

const FILE_LINK: &str = "https://drive.google.com/file/d";

/// The subset of a Drive `File` resource returned by `files.create`.
#[derive(Debug, Deserialize, Fields)]
pub struct DriveFile {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "mimeType")]
    #[fievar(name = "mimeType")]
    pub mime_type: Option<String>,
}

impl DriveFile {
    pub fn link(&self) -> String {
        format!("{FILE_LINK}/{}", self.id)
    }
}
