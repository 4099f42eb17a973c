//! The single page, rendered per request from the outcome of that request.

use std::fmt::Write;

const TITLE: &str = "Upload File to Google Drive";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    ConfigError(String),
    Authorize { url: String },
    Authorized,
    AuthFailed(String),
    NotAuthorized(String),
    UploadForm,
    Uploaded { name: String, link: String },
    UploadFailed { name: String, error: String },
}

enum Banner {
    Info,
    Success,
    Warning,
    Error,
}

impl Banner {
    fn class(&self) -> &'static str {
        match self {
            Banner::Info => "info",
            Banner::Success => "success",
            Banner::Warning => "warning",
            Banner::Error => "error",
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn banner(out: &mut String, kind: Banner, text: &str) {
    let _ = write!(
        out,
        r#"<div class="banner {}">{}</div>"#,
        kind.class(),
        escape(text)
    );
}

fn upload_form(out: &mut String) {
    out.push_str(
        r#"<form method="post" action="/upload" enctype="multipart/form-data">
<label for="file">Upload any file to Google Drive</label>
<input type="file" id="file" name="file" required>
<button type="submit">Upload</button>
</form>"#,
    );
}

impl Page {
    pub fn render(&self) -> String {
        let mut body = String::new();

        match self {
            Page::ConfigError(msg) => banner(&mut body, Banner::Error, msg),

            Page::Authorize { url } => {
                banner(
                    &mut body,
                    Banner::Info,
                    "Please authorize the app to access your Google Drive.",
                );
                let _ = write!(
                    body,
                    r#"<p><a href="{}" target="_blank" rel="noopener">Click here to authorize your Google account</a></p>
<form method="post" action="/authorize">
<label for="code">Paste the authorization code here:</label>
<input type="text" id="code" name="code" autocomplete="off">
<button type="submit">Submit</button>
</form>"#,
                    escape(url)
                );
            }

            Page::Authorized => banner(
                &mut body,
                Banner::Success,
                "Authorization successful! Reload the app.",
            ),

            Page::AuthFailed(msg) => {
                banner(&mut body, Banner::Error, &format!("Authorization failed: {msg}"))
            }

            Page::NotAuthorized(detail) => {
                banner(&mut body, Banner::Warning, "App not authorized yet.");
                banner(&mut body, Banner::Error, detail);
            }

            Page::UploadForm => upload_form(&mut body),

            Page::Uploaded { name, link } => {
                upload_form(&mut body);
                banner(&mut body, Banner::Info, &format!("Uploading `{name}`..."));
                banner(&mut body, Banner::Success, "File uploaded successfully!");
                let _ = write!(
                    body,
                    r#"<p><a href="{}" target="_blank" rel="noopener">Open File</a></p>"#,
                    escape(link)
                );
            }

            Page::UploadFailed { name, error } => {
                upload_form(&mut body);
                // empty when the request body itself could not be read
                if !name.is_empty() {
                    banner(&mut body, Banner::Info, &format!("Uploading `{name}`..."));
                }
                banner(&mut body, Banner::Error, &format!("Upload failed: {error}"));
            }
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Google Drive Upload</title>
<style>
body {{ font-family: sans-serif; max-width: 42rem; margin: 3rem auto; }}
.banner {{ padding: .75rem 1rem; margin: 1rem 0; border-radius: .4rem; }}
.info {{ background: #e7f1fb; }}
.success {{ background: #e5f6e9; }}
.warning {{ background: #fff6dd; }}
.error {{ background: #fde8e8; }}
</style>
</head>
<body>
<h1>{TITLE}</h1>
{body}
</body>
</html>
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn authorize_page_links_url_and_asks_for_code() {
        let html = Page::Authorize {
            url: "https://accounts.google.com/o/oauth2/auth?client_id=a&scope=b".into(),
        }
        .render();

        assert!(html.contains(
            r#"href="https://accounts.google.com/o/oauth2/auth?client_id=a&amp;scope=b""#
        ));
        assert!(html.contains(r#"name="code""#));
        assert!(!html.contains(r#"type="file""#));
    }

    #[test]
    fn config_error_has_no_code_prompt() {
        let html = Page::ConfigError("credentials.json not found!".into()).render();

        assert!(html.contains("credentials.json not found!"));
        assert!(!html.contains(r#"name="code""#));
        assert!(!html.contains(r#"type="file""#));
    }

    #[test]
    fn failed_upload_has_no_link() {
        let page = Page::UploadFailed {
            name: "<script>.txt".into(),
            error: "GoogleAPIError 403".into(),
        };
        let html = page.render();

        assert!(html.contains(r#"type="file""#));
        assert!(html.contains("Upload failed: GoogleAPIError 403"));
        assert!(html.contains("&lt;script&gt;.txt"));
        assert!(!html.contains("Open File"));
    }

    #[test]
    fn unread_upload_has_no_uploading_banner() {
        let html = Page::UploadFailed {
            name: String::new(),
            error: "length limit exceeded".into(),
        }
        .render();

        assert!(html.contains("Upload failed: length limit exceeded"));
        assert!(!html.contains("Uploading"));
    }

    #[test]
    fn not_authorized_shows_detail() {
        let html = Page::NotAuthorized("stored credential 'token.json' is unusable".into()).render();

        assert!(html.contains("App not authorized yet."));
        assert!(html.contains("stored credential &#39;token.json&#39; is unusable"));
    }

    #[test]
    fn uploaded_page_links_file() {
        let html = Page::Uploaded {
            name: "a.txt".into(),
            link: "https://drive.google.com/file/d/1abc".into(),
        }
        .render();

        assert!(html.contains(r#"href="https://drive.google.com/file/d/1abc""#));
        assert!(html.contains("File uploaded successfully!"));
    }
}
