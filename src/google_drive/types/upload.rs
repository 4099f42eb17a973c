use serde_json::json;

const OCTET_STREAM: &str = "application/octet-stream";

/// A file held in memory for the duration of one upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// When the browser did not report a useful type, the type is sniffed
    /// from the content.
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let mime_type = match mime_type {
            Some(m) if !m.is_empty() && m != OCTET_STREAM => m.to_string(),
            _ => tree_magic_mini::from_u8(&bytes).to_string(),
        };

        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn metadata(&self, parent: &str) -> serde_json::Value {
        json!({
            "name": self.name,
            "parents": [parent],
        })
    }

    /// Builds a `multipart/related` body: JSON metadata first, then the raw
    /// media bytes.
    pub fn multipart_body(&self, parent: &str, boundary: &str) -> Vec<u8> {
        let metadata = self.metadata(parent).to_string();

        let mut body = Vec::with_capacity(self.bytes.len() + metadata.len() + 256);
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.as_bytes());
        body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", self.mime_type).as_bytes());
        body.extend_from_slice(&self.bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        body
    }

    pub fn content_type(boundary: &str) -> String {
        format!("multipart/related; boundary={boundary}")
    }
}
