// src/config.rs

use anyhow::{anyhow, Context, Result};
use std::{env, str::FromStr, time::Duration};
use url::Url;

pub const ENV_URL: &str = "CDB_URL";
pub const ENV_FORMAT: &str = "CDB_FORMAT";
pub const ENV_TIMEOUT: &str = "CDB_TIMEOUT_SECS";

/// Which header dialect family to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    /// Reserved `CIS*` vocabulary with inferred column types.
    #[default]
    Cis,
    /// `name[TYPE|...]` annotated headers.
    Annotated,
}

impl FromStr for ManifestFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cis" | "cdb" => Ok(ManifestFormat::Cis),
            "annotated" | "ods" => Ok(ManifestFormat::Annotated),
            other => Err(anyhow!("unknown manifest format `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Database directory; the manifest is `data.csv` inside it.
    pub base_url: Url,
    pub format: ManifestFormat,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ReaderConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("parsing base url {}", base_url))?;
        Ok(Self {
            base_url,
            format: ManifestFormat::default(),
            timeout: None,
        })
    }

    pub fn with_format(mut self, format: ManifestFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build from `CDB_URL`, `CDB_FORMAT` and `CDB_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let url = env::var(ENV_URL).with_context(|| format!("{} is not set", ENV_URL))?;
        Self::from_parts(
            &url,
            env::var(ENV_FORMAT).ok().as_deref(),
            env::var(ENV_TIMEOUT).ok().as_deref(),
        )
    }

    pub fn from_parts(url: &str, format: Option<&str>, timeout_secs: Option<&str>) -> Result<Self> {
        let mut cfg = Self::new(url)?;
        if let Some(f) = format {
            cfg.format = f.parse()?;
        }
        if let Some(t) = timeout_secs {
            let secs: u64 = t
                .trim()
                .parse()
                .with_context(|| format!("{} must be whole seconds, got `{}`", ENV_TIMEOUT, t))?;
            cfg.timeout = Some(Duration::from_secs(secs));
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!("CIS".parse::<ManifestFormat>().unwrap(), ManifestFormat::Cis);
        assert_eq!(
            " annotated ".parse::<ManifestFormat>().unwrap(),
            ManifestFormat::Annotated
        );
        assert!("xml".parse::<ManifestFormat>().is_err());
    }

    #[test]
    fn from_parts_defaults() {
        let cfg = ReaderConfig::from_parts("http://localhost/db", None, None).unwrap();
        assert_eq!(cfg.format, ManifestFormat::Cis);
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.base_url.as_str(), "http://localhost/db");
    }

    #[test]
    fn from_parts_overrides() {
        let cfg = ReaderConfig::from_parts("http://localhost/db", Some("ods"), Some("15")).unwrap();
        assert_eq!(cfg.format, ManifestFormat::Annotated);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ReaderConfig::from_parts("not a url", None, None).is_err());
        assert!(ReaderConfig::from_parts("http://h/db", None, Some("soon")).is_err());
    }
}
