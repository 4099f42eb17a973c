use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::Settings,
    credentials::{self, Authorization, ConfigMissing, TokenUnusable},
    google_drive::{Drive, UploadFile},
    page::Page,
    upload,
};

pub struct AppState {
    pub settings: Settings,
    pub drive: Drive,
}

impl AppState {
    pub fn new(settings: Settings, drive: Drive) -> Self {
        Self { settings, drive }
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct CodeForm {
    #[serde(default)]
    code: String,
}

pub fn router(state: AppState) -> Router {
    let limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/authorize", post(authorize))
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(settings.listen).await?;
    info!("listening on http://{}", listener.local_addr()?);

    let app = router(AppState::new(settings, Drive::default()));
    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps a loader failure onto the page that reports it.
fn load_failed(e: anyhow::Error) -> Page {
    if let Some(missing) = e.downcast_ref::<ConfigMissing>() {
        return Page::ConfigError(missing.to_string());
    }

    warn!("could not load credential: {e:#}");
    if e.downcast_ref::<TokenUnusable>().is_some() {
        Page::NotAuthorized(format!("{e:#}"))
    } else {
        Page::ConfigError(format!("{e:#}"))
    }
}

async fn index(State(state): State<SharedState>) -> Html<String> {
    let page = match credentials::load(&state.settings).await {
        Ok(Authorization::Ready(_)) => Page::UploadForm,
        Ok(Authorization::Pending { url, .. }) => Page::Authorize { url },
        Err(e) => load_failed(e),
    };

    Html(page.render())
}

async fn authorize(State(state): State<SharedState>, Form(form): Form<CodeForm>) -> Html<String> {
    let page = match credentials::load(&state.settings).await {
        Ok(Authorization::Ready(_)) => Page::UploadForm,
        Ok(Authorization::Pending { url, .. }) if form.code.trim().is_empty() => {
            Page::Authorize { url }
        }
        Ok(Authorization::Pending { secret, .. }) => {
            match credentials::authorize(&state.settings, &secret, &form.code).await {
                Ok(_) => Page::Authorized,
                Err(e) => {
                    warn!("authorization failed: {e:#}");
                    Page::AuthFailed(format!("{e:#}"))
                }
            }
        }
        Err(e) => load_failed(e),
    };

    Html(page.render())
}

async fn read_file(multipart: &mut Multipart) -> anyhow::Result<Option<UploadFile>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let name = match field.file_name() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => return Ok(None),
        };
        let mime = field.content_type().map(String::from);
        let bytes = field.bytes().await?;

        return Ok(Some(UploadFile::new(name, mime.as_deref(), bytes.to_vec())));
    }

    Ok(None)
}

async fn upload_file(State(state): State<SharedState>, mut multipart: Multipart) -> Html<String> {
    let credential = match credentials::load(&state.settings).await {
        Ok(Authorization::Ready(c)) => c,
        Ok(Authorization::Pending { url, .. }) => return Html(Page::Authorize { url }.render()),
        Err(e) => return Html(load_failed(e).render()),
    };

    let file = match read_file(&mut multipart).await {
        Ok(Some(f)) => f,
        Ok(None) => return Html(Page::UploadForm.render()),
        Err(e) => {
            warn!("could not read uploaded file: {e:#}");
            return Html(
                Page::UploadFailed {
                    name: String::new(),
                    error: format!("{e:#}"),
                }
                .render(),
            );
        }
    };

    let page = match upload::upload(&state.settings, &state.drive, credential, &file).await {
        Ok(up) => Page::Uploaded {
            name: file.name,
            link: up.link,
        },
        Err(e) => {
            warn!(name = %file.name, "upload failed: {e:#}");
            Page::UploadFailed {
                name: file.name,
                error: format!("{e:#}"),
            }
        }
    };

    Html(page.render())
}
