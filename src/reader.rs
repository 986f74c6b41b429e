// src/reader.rs

use reqwest::Client;
use tracing::{info, instrument};

use crate::config::{ManifestFormat, ReaderConfig};
use crate::error::Result;
use crate::fetch::fetch_manifest;
use crate::manifest::Manifest;
use crate::schema::{annotated, cis};
use crate::table::RawTable;

/// Fetches and parses one manifest. `read` consumes the reader, so a
/// reader fetches at most once.
pub struct Reader {
    client: Client,
    config: ReaderConfig,
}

impl Reader {
    pub fn new(config: ReaderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    pub fn with_client(client: Client, config: ReaderConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    #[instrument(level = "info", skip(self), fields(base = %self.config.base_url, format = ?self.config.format))]
    pub async fn read(self) -> Result<Manifest> {
        let text = fetch_manifest(&self.client, &self.config.base_url).await?;
        parse_manifest(&text, self.config.format)
    }
}

/// Parse already-fetched manifest text.
pub fn parse_manifest(text: &str, format: ManifestFormat) -> Result<Manifest> {
    let table = RawTable::parse(text)?;
    let manifest = match format {
        ManifestFormat::Cis => cis::parse(&table),
        ManifestFormat::Annotated => annotated::parse(&table)?,
    };
    info!(
        dialect = ?manifest.dialect(),
        fields = manifest.fields().len(),
        rows = manifest.rows().len(),
        layers = manifest.layers().len(),
        channels = manifest.channels().len(),
        "parsed manifest"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;
    use crate::schema::{Dialect, Value};
    use std::time::Duration;

    fn config(server: &mockito::Server, format: ManifestFormat) -> ReaderConfig {
        ReaderConfig::new(&format!("{}/cinema", server.url()))
            .unwrap()
            .with_format(format)
    }

    #[tokio::test]
    async fn reads_structured_manifest() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/cinema/data.csv")
            .with_body(
                "CISVersion,CISImage,CISLayer,CISChannel,CISImageWidth,CISImageHeight,FILE\r\n\
                 1,img0,0,depth,64,64,a.png\r\n\
                 1,img0,1,depth,64,64,b.png\r\n",
            )
            .create_async()
            .await;

        let reader = Reader::new(config(&server, ManifestFormat::Cis)).unwrap();
        let m = reader.read().await.unwrap();
        assert_eq!(m.dialect(), Dialect::Cis);
        assert_eq!(m.rows().len(), 2);
        assert_eq!(m.layers(), ["0", "1"]);
        assert_eq!(
            m.row_at(1).unwrap().get("FILE"),
            Some(&Value::from("b.png"))
        );
    }

    #[tokio::test]
    async fn malformed_annotated_header_rejects_despite_200() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/cinema/data.csv")
            .with_status(200)
            .with_body("bad_column,FILEpath\n1,a.png\n")
            .create_async()
            .await;

        let reader = Reader::new(config(&server, ManifestFormat::Annotated)).unwrap();
        let err = reader.read().await.unwrap_err();
        assert!(matches!(err, ReadError::MalformedHeader));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/cinema/data.csv")
            .with_status(500)
            .create_async()
            .await;

        let reader = Reader::new(config(&server, ManifestFormat::Cis)).unwrap();
        let err = reader.read().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn reader_keeps_its_config() {
        let cfg = ReaderConfig::new("http://localhost:9/cinema")
            .unwrap()
            .with_format(ManifestFormat::Annotated)
            .with_timeout(Duration::from_secs(5));
        let reader = Reader::new(cfg).unwrap();
        assert_eq!(reader.config().timeout, Some(Duration::from_secs(5)));
        assert_eq!(reader.config().format, ManifestFormat::Annotated);
    }

    #[test]
    fn parse_manifest_rejects_empty_body() {
        assert!(matches!(
            parse_manifest("", ManifestFormat::Cis),
            Err(ReadError::Empty)
        ));
    }
}
