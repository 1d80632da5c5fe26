/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Typed document model lifted from the raw KML tree.
//!
//! Lifting is guarded: a placemark missing its name, coordinates or style
//! reference is dropped and reported, never dereferenced. Folder indices are
//! assigned before any placemark is inspected so they stay stable even when
//! a folder ends up empty.

use crate::geo::{CoordinateError, LonLat};
use kml_source::model::{Kml, Style, StyleMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub groups: Vec<Group>,
    /// Style definitions and style maps, kept raw for the style resolver.
    #[serde(skip)]
    pub styles: Vec<Style>,
    #[serde(skip)]
    pub style_maps: Vec<StyleMap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub index: usize,
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub description: Option<String>,
    pub style_url: String,
    pub coordinates: LonLat,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiftError {
    #[error("document has no title")]
    MissingTitle,
}

/// A placemark that was skipped while lifting.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("placemark {position} in group {group} ({label}): {problem}")]
pub struct MalformedEntity {
    pub group: usize,
    pub position: usize,
    /// The placemark name when it has one, otherwise `<unnamed>`.
    pub label: String,
    pub problem: EntityProblem,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityProblem {
    #[error("missing name")]
    MissingName,

    #[error("missing coordinates")]
    MissingCoordinates,

    #[error("bad coordinates: {0}")]
    BadCoordinates(#[from] CoordinateError),

    #[error("missing style reference")]
    MissingStyle,
}

impl Document {
    /// Lift a raw tree. Malformed placemarks are appended to `skipped`.
    pub fn from_kml(kml: Kml, skipped: &mut Vec<MalformedEntity>) -> Result<Self, LiftError> {
        let doc = kml.document;
        let title = doc.name.ok_or(LiftError::MissingTitle)?;

        let groups = doc
            .folders
            .into_iter()
            .enumerate()
            .map(|(index, folder)| {
                let mut points = Vec::with_capacity(folder.placemarks.len());
                for (position, placemark) in folder.placemarks.into_iter().enumerate() {
                    let label = placemark
                        .name
                        .clone()
                        .unwrap_or_else(|| "<unnamed>".to_string());
                    match lift_point(placemark) {
                        Ok(point) => points.push(point),
                        Err(problem) => skipped.push(MalformedEntity {
                            group: index,
                            position,
                            label,
                            problem,
                        }),
                    }
                }
                Group {
                    index,
                    name: folder.name.unwrap_or_default(),
                    points,
                }
            })
            .collect();

        Ok(Self {
            title,
            groups,
            styles: doc.styles,
            style_maps: doc.style_maps,
        })
    }

    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

fn lift_point(placemark: kml_source::model::Placemark) -> Result<Point, EntityProblem> {
    let name = placemark.name.ok_or(EntityProblem::MissingName)?;
    let raw = placemark
        .coordinates
        .ok_or(EntityProblem::MissingCoordinates)?;
    let coordinates = LonLat::parse(&raw)?;
    let style_url = placemark.style_url.ok_or(EntityProblem::MissingStyle)?;

    Ok(Point {
        name,
        description: placemark.description,
        style_url,
        coordinates,
    })
}
