use anyhow::{Context, Result};
use cdbreader::{
    config::{ManifestFormat, ReaderConfig, ENV_FORMAT, ENV_TIMEOUT},
    fetch::MANIFEST_FILE,
    parse_manifest, Manifest, Reader,
};
use std::{env, path::Path};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Usage: `cdbreader [DATABASE_URL_OR_DIR]`
///
/// Without an argument the database URL comes from `CDB_URL`. A local
/// directory (or a `data.csv` path) is read from disk instead of over HTTP.
#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve source ───────────────────────────────────────────
    let manifest = match env::args().nth(1) {
        Some(arg) if Path::new(&arg).exists() => read_local(Path::new(&arg)).await?,
        Some(arg) => {
            let cfg = ReaderConfig::from_parts(
                &arg,
                env::var(ENV_FORMAT).ok().as_deref(),
                env::var(ENV_TIMEOUT).ok().as_deref(),
            )?;
            read_remote(cfg).await?
        }
        None => read_remote(ReaderConfig::from_env()?).await?,
    };

    // ─── 3) print schema + rows ──────────────────────────────────────
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

async fn read_remote(cfg: ReaderConfig) -> Result<Manifest> {
    info!(url = %cfg.base_url, "reading manifest");
    let base = cfg.base_url.clone();
    Reader::new(cfg)?
        .read()
        .await
        .with_context(|| format!("reading manifest from {}", base))
}

async fn read_local(path: &Path) -> Result<Manifest> {
    let file = if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path.to_path_buf()
    };
    info!(path = %file.display(), "reading local manifest");

    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let format: ManifestFormat = match env::var(ENV_FORMAT) {
        Ok(f) => f.parse()?,
        Err(_) => ManifestFormat::default(),
    };
    parse_manifest(&text, format).with_context(|| format!("parsing {}", file.display()))
}
