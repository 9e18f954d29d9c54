//! `duelhub [PORT]` runs the server on `0.0.0.0:PORT` (default 8080).
//!
//! Log verbosity follows `RUST_LOG`, defaulting to `info`.

use duelhub::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), DuelhubError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let port = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u16>()
            .map_err(|_| DuelhubError::InvalidPort(arg))?,
        None => DEFAULT_PORT,
    };

    let server = DuelhubServer::builder()
        .bind(&format!("0.0.0.0:{port}"))
        .build()
        .await?;
    tracing::info!(port, "game server started");
    server.run().await
}
