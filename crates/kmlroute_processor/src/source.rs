/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Document retrieval and lifting.

use crate::config::SourceConfig;
use crate::error::{ProcessorError, Result};
use async_trait::async_trait;
use kml_source::parse_kml;
use kmlroute_core::{Document, MalformedEntity};
use std::path::PathBuf;
use std::time::Duration;

/// Where the KML text comes from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the raw document. Every failure is `SourceUnavailable`.
    async fn fetch(&self, id: &str) -> Result<String>;
}

/// Fetches over HTTP from a URL template containing `{id}`.
pub struct HttpSource {
    http_client: reqwest::Client,
    config: SourceConfig,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProcessorError::Config {
                path: "[source]".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, id: &str) -> Result<String> {
        let url = self.config.document_url(id);
        tracing::info!(%url, "fetching document");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProcessorError::source_unavailable(id, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| ProcessorError::source_unavailable(id, e))?;

        response
            .text()
            .await
            .map_err(|e| ProcessorError::source_unavailable(id, e))
    }
}

/// Reads a local KML file; the document id is only used for messages.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, id: &str) -> Result<String> {
        tracing::info!(path = %self.path.display(), "reading document");
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ProcessorError::source_unavailable(id, format!("{}: {e}", self.path.display()))
        })
    }
}

/// Parse and lift KML text. Skipped placemarks are returned alongside.
pub fn parse_document(id: &str, text: &str) -> Result<(Document, Vec<MalformedEntity>)> {
    let kml = parse_kml(text).map_err(|e| ProcessorError::source_unavailable(id, e))?;
    let mut skipped = Vec::new();
    let document =
        Document::from_kml(kml, &mut skipped).map_err(|e| ProcessorError::source_unavailable(id, e))?;
    Ok((document, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_well_formed_is_source_unavailable() {
        let err = parse_document("mid-1", "<kml><Document>").unwrap_err();
        match err {
            ProcessorError::SourceUnavailable { id, cause } => {
                assert_eq!(id, "mid-1");
                assert!(cause.starts_with("malformed XML"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_untitled_document_is_source_unavailable() {
        let err = parse_document("mid-2", "<kml><Document></Document></kml>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot read document mid-2: document has no title"
        );
    }

    #[tokio::test]
    async fn test_missing_file_names_id_and_path() {
        let source = FileSource::new("/definitely/not/here.kml");
        let err = source.fetch("mid-3").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("mid-3"));
        assert!(message.contains("/definitely/not/here.kml"));
    }
}
