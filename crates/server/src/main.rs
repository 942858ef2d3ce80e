//! # citysheet-server
//!
//! Loads a sheet export and serves its layer descriptors to the renderer,
//! which reports hover events back.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use citysheet_core::{
    CityError, DocumentSource, HoverEvent, Layer, LoadOptions, Session, SessionConfig,
    SessionHandle,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// citysheet - spreadsheet dependencies as a 3D city
#[derive(Parser)]
#[command(name = "citysheet")]
#[command(author, version, about = "Serve a spreadsheet dependency city to a 3D renderer", long_about = None)]
struct Cli {
    /// Sheet export to load (file path or http(s) URL)
    #[arg(value_name = "DOCUMENT", default_value = "sheet_info.json")]
    document: DocumentSource,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Delay before the towers rise, in milliseconds
    #[arg(long, default_value_t = 1000)]
    animation_delay_ms: u64,

    /// Timeout for fetching a URL document, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Error response for a session that has stopped.
struct ApiError(CityError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            CityError::SessionClosed => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

impl From<CityError> for ApiError {
    fn from(err: CityError) -> Self {
        Self(err)
    }
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn layers(State(session): State<SessionHandle>) -> Result<Json<Vec<Layer>>, ApiError> {
    let layers = session.layers().await?;
    Ok(Json(Vec::clone(&layers)))
}

async fn hover(
    State(session): State<SessionHandle>,
    Json(event): Json<HoverEvent>,
) -> Result<Json<Vec<Layer>>, ApiError> {
    let layers = session.hover(event).await?;
    Ok(Json(Vec::clone(&layers)))
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(session: SessionHandle) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/layers", get(layers))
        .route("/hover", post(hover))
        .with_state(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = SessionConfig {
        animation_delay: Duration::from_millis(cli.animation_delay_ms),
        load: LoadOptions {
            timeout: Duration::from_secs(cli.timeout_secs),
        },
    };
    let session = Session::start(&cli.document, config)
        .await
        .with_context(|| format!("Failed to load {}", cli.document))?;

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    tracing::info!(addr = %cli.addr, "citysheet listening");
    axum::serve(listener, create_router(session)).await?;

    Ok(())
}
