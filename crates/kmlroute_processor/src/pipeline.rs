/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! End-to-end build: retrieve, lift, resolve, fold.

use crate::builder::{BuildOutput, OptionBuilder};
use crate::config::Config;
use crate::error::Result;
use crate::place::PlaceSearch;
use crate::source::{parse_document, DocumentSource};

/// One configured build. Stages are switched by `config.features`.
pub struct Pipeline<'a> {
    config: &'a Config,
    search: Option<&'a dyn PlaceSearch>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            search: None,
        }
    }

    pub fn with_search(mut self, search: &'a dyn PlaceSearch) -> Self {
        self.search = Some(search);
        self
    }

    /// Run the build for one document. Only retrieval and parsing can fail;
    /// everything after that degrades per point.
    pub async fn run(&self, id: &str, source: &dyn DocumentSource) -> Result<BuildOutput> {
        let text = source.fetch(id).await?;
        self.run_text(id, &text).await
    }

    /// Same as [`Pipeline::run`], for text already in hand.
    pub async fn run_text(&self, id: &str, text: &str) -> Result<BuildOutput> {
        let (document, skipped) = parse_document(id, text)?;
        tracing::info!(
            title = %document.title,
            groups = document.groups.len(),
            points = document.point_count(),
            "document parsed"
        );

        let mut builder = OptionBuilder::new(self.config.features)
            .with_concurrency(self.config.places.concurrency);
        if let Some(search) = self.search {
            builder = builder.with_search(search);
        }

        let mut output = builder.build(id, &document).await;
        output.report.record_skipped(skipped);

        let report = &output.report;
        tracing::info!(
            points = report.points,
            skipped = report.skipped,
            styles_unresolved = report.styles_unresolved,
            ids_from_text = report.ids_from_text,
            ids_from_lookup = report.ids_from_lookup,
            ids_unresolved = report.ids_unresolved,
            "options built"
        );
        Ok(output)
    }
}
