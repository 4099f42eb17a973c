use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use drive_drop::{config, server};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "drive-drop", version, about = "Upload a file to Google Drive from the browser")]
struct Cli {
    /// Address the page is served on.
    #[arg(long, default_value = config::DEFAULT_LISTEN)]
    listen: SocketAddr,

    /// Where the OAuth credential is stored after authorization.
    #[arg(long, default_value = config::TOKEN_FILE)]
    token_file: PathBuf,

    /// OAuth client secret downloaded from the Google Cloud console.
    #[arg(long, default_value = config::CREDENTIALS_FILE)]
    credentials_file: PathBuf,

    /// Largest accepted upload, in megabytes.
    #[arg(long, default_value_t = config::DEFAULT_MAX_UPLOAD_BYTES / (1024 * 1024))]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let settings = config::Settings {
        token_file: cli.token_file,
        credentials_file: cli.credentials_file,
        listen: cli.listen,
        max_upload_bytes: config::megabytes(cli.max_upload_mb),
    };

    server::serve(settings).await
}
