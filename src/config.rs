use std::{net::SocketAddr, path::PathBuf};

/// Drive folder every upload lands in.
pub const FOLDER_ID: &str = "1lVsJ3-CjtgKaAyBszmaDWEC6MaOVpZwV";

/// Only files created by this app are visible to it.
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/drive.file"];

pub const TOKEN_FILE: &str = "token.json";
pub const CREDENTIALS_FILE: &str = "credentials.json";

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8501";

// 200 MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Settings {
    pub token_file: PathBuf,
    pub credentials_file: PathBuf,
    pub listen: SocketAddr,
    pub max_upload_bytes: usize,
}

/// Megabytes to bytes, clamped at `usize::MAX`.
pub fn megabytes(mb: usize) -> usize {
    mb.saturating_mul(1024 * 1024)
}

#[cfg(test)]
impl Settings {
    /// Settings rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();

        Self {
            token_file: dir.join(TOKEN_FILE),
            credentials_file: dir.join(CREDENTIALS_FILE),
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token_file: TOKEN_FILE.into(),
            credentials_file: CREDENTIALS_FILE.into(),
            listen: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
