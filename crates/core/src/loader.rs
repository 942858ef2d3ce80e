//! Fetching the sheet export from disk or over HTTP.

use crate::error::{CityError, CityResult};
use citysheet_sheet::SheetSnapshot;
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Where the export document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Url(String),
}

impl FromStr for DocumentSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Options for loading the document.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Request timeout for URL sources.
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Load and parse the export document.
///
/// # Errors
///
/// `LoadFailure` when the document cannot be read, fetched or decoded as
/// JSON; `MalformedSheet` when it lacks the sheet shape.
pub async fn load_snapshot(
    source: &DocumentSource,
    options: &LoadOptions,
) -> CityResult<SheetSnapshot> {
    let content = match source {
        DocumentSource::Path(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CityError::load(format!("Failed to read {}: {e}", path.display())))?,
        DocumentSource::Url(url) => fetch_text(url, options).await?,
    };

    let snapshot = SheetSnapshot::from_json_str(&content)?;
    tracing::info!(
        %source,
        cells = snapshot.cell_count(),
        rows = snapshot.rows().len(),
        cols = snapshot.cols().len(),
        "loaded sheet"
    );
    Ok(snapshot)
}

async fn fetch_text(url: &str, options: &LoadOptions) -> CityResult<String> {
    let client = Client::builder()
        .timeout(options.timeout)
        // Disable system proxy lookup to avoid macOS system-configuration issues
        .no_proxy()
        .build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(CityError::load(format!(
            "HTTP {} - {}",
            response.status(),
            response.status().canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(response.text().await?)
}
