/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Folds a document into the option list.
//!
//! Points are visited group by group in declaration order. Style and
//! embedded-id resolution are synchronous; fallback lookups for the points
//! still missing an id run through an ordered, bounded stream, so options
//! come out in document order however the lookups complete.

use crate::config::Features;
use crate::error::Issue;
use crate::place::{NearbyQuery, PlaceIdExtractor, PlaceSearch, RegexPlaceIdExtractor};
use crate::style::{color_from_reference, StyleSheet};
use futures::stream::{self, StreamExt};
use kmlroute_core::{
    Document, GroupInfo, LatLng, MalformedEntity, OptionModel, PlaceId, Point, ResolvedStyle,
    RouteOption,
};

/// Counts and conditions collected while building.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub groups: usize,
    pub points: usize,
    pub skipped: usize,
    pub styles_unresolved: usize,
    pub ids_from_text: usize,
    pub ids_from_lookup: usize,
    pub ids_unresolved: usize,
    pub issues: Vec<Issue>,
}

impl BuildReport {
    pub fn record_skipped(&mut self, skipped: Vec<MalformedEntity>) {
        for entity in skipped {
            tracing::warn!(%entity, "skipping placemark");
            self.skipped += 1;
            self.issues.push(Issue::MalformedEntity(entity));
        }
    }
}

#[derive(Debug)]
pub struct BuildOutput {
    pub model: OptionModel,
    pub report: BuildReport,
}

/// A point after the synchronous stages.
struct Pending<'d> {
    point: &'d Point,
    group: usize,
    location: LatLng,
    style: ResolvedStyle,
    place_id: Option<PlaceId>,
}

enum IdSource {
    Text(PlaceId),
    Lookup(PlaceId),
    Missing(String),
}

pub struct OptionBuilder<'a> {
    features: Features,
    extractor: RegexPlaceIdExtractor,
    search: Option<&'a dyn PlaceSearch>,
    concurrency: usize,
}

impl Default for OptionBuilder<'_> {
    fn default() -> Self {
        Self::new(Features::all())
    }
}

impl<'a> OptionBuilder<'a> {
    pub fn new(features: Features) -> Self {
        Self {
            features,
            extractor: RegexPlaceIdExtractor::default(),
            search: None,
            concurrency: 1,
        }
    }

    /// Enable the fallback lookup. Ignored when the feature is off.
    pub fn with_search(mut self, search: &'a dyn PlaceSearch) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn build(&self, document_id: &str, document: &Document) -> BuildOutput {
        let mut report = BuildReport {
            groups: document.groups.len(),
            ..Default::default()
        };

        let sheet = self
            .features
            .style_resolution
            .then(|| StyleSheet::new(&document.styles, &document.style_maps));
        if let Some(sheet) = &sheet {
            tracing::debug!(
                defs = sheet.def_count(),
                aliases = sheet.alias_count(),
                "style sheet built"
            );
        }

        let mut pending = Vec::with_capacity(document.point_count());
        for group in &document.groups {
            for point in &group.points {
                let style = match &sheet {
                    Some(sheet) => sheet.resolve(&point.style_url).unwrap_or_else(|| {
                        report.styles_unresolved += 1;
                        report.issues.push(Issue::StyleUnresolved {
                            point: point.name.clone(),
                            reference: point.style_url.clone(),
                        });
                        ResolvedStyle::unresolved()
                    }),
                    None => ResolvedStyle {
                        color: color_from_reference(&point.style_url),
                        ..Default::default()
                    },
                };
                let place_id = point
                    .description
                    .as_deref()
                    .and_then(|text| self.extractor.extract(text));

                pending.push(Pending {
                    point,
                    group: group.index,
                    location: point.coordinates.swap(),
                    style,
                    place_id,
                });
            }
        }

        let search = self.search.filter(|_| self.features.identifier_fallback);
        let sources: Vec<IdSource> = stream::iter(pending.iter())
            .map(|p| resolve_id(p, search))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut points = Vec::with_capacity(pending.len());
        for (p, source) in pending.into_iter().zip(sources) {
            let place_id = match source {
                IdSource::Text(id) => {
                    report.ids_from_text += 1;
                    Some(id)
                }
                IdSource::Lookup(id) => {
                    report.ids_from_lookup += 1;
                    Some(id)
                }
                IdSource::Missing(reason) => {
                    report.ids_unresolved += 1;
                    report.issues.push(Issue::IdentifierUnresolved {
                        point: p.point.name.clone(),
                        reason,
                    });
                    None
                }
            };
            points.push(RouteOption {
                label: p.point.name.clone(),
                coordinates: Some(p.location),
                group: Some(p.group),
                style: p.style,
                place_id,
            });
        }
        report.points = points.len();

        let groups = document
            .groups
            .iter()
            .map(|g| GroupInfo {
                index: g.index,
                name: g.name.clone(),
            })
            .collect();

        BuildOutput {
            model: OptionModel::new(document_id, document.title.clone(), groups, points),
            report,
        }
    }
}

async fn resolve_id(p: &Pending<'_>, search: Option<&dyn PlaceSearch>) -> IdSource {
    if let Some(id) = &p.place_id {
        return IdSource::Text(id.clone());
    }
    let Some(search) = search else {
        return IdSource::Missing("no embedded id".to_string());
    };

    let query = NearbyQuery {
        keyword: &p.point.name,
        location: p.location,
    };
    match search.nearby(&query).await {
        Ok(id) => {
            tracing::debug!(point = %p.point.name, %id, "place id from lookup");
            IdSource::Lookup(id)
        }
        Err(e) => {
            tracing::warn!(point = %p.point.name, error = %e, "place lookup failed");
            IdSource::Missing(e.to_string())
        }
    }
}
