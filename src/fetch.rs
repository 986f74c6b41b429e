// src/fetch.rs

use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{ReadError, Result};

/// The manifest's file name inside a database directory.
pub const MANIFEST_FILE: &str = "data.csv";

/// `{base}/data.csv`, whether or not `base` ends in a slash.
pub fn manifest_url(base: &Url) -> Result<Url> {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    Ok(dir.join(MANIFEST_FILE)?)
}

/// GET the manifest text. A non-success status becomes
/// [`ReadError::Transport`]; no retries.
#[instrument(level = "debug", skip(client, base), fields(base = %base))]
pub async fn fetch_manifest(client: &Client, base: &Url) -> Result<String> {
    let url = manifest_url(base)?;
    debug!(%url, "fetching manifest");

    let resp = client.get(url.clone()).send().await?;
    let status = resp.status();
    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "manifest request failed");
        return Err(ReadError::Transport {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    Ok(resp.text().await?)
}
