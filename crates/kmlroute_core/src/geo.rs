/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Coordinate pairs.
//!
//! KML writes coordinates as `lon,lat[,alt]`; everything downstream of the
//! document model works in `lat,lng`. The two orders are separate types so
//! a swap can't be forgotten or applied twice.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("coordinate text is empty")]
    Empty,

    #[error("expected `lon,lat[,alt]`, got {0:?}")]
    Shape(String),

    #[error("invalid number {0:?}")]
    Number(String),
}

/// A source-order coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Parse the first tuple of a KML `<coordinates>` value.
    ///
    /// Tuples are whitespace separated; a point has exactly one, but any
    /// trailing tuples are ignored. Whitespace next to a comma belongs to the
    /// tuple. Altitude is optional and discarded.
    pub fn parse(raw: &str) -> Result<Self, CoordinateError> {
        let joined = raw.split(',').map(str::trim).collect::<Vec<_>>().join(",");
        let tuple = joined
            .split_whitespace()
            .next()
            .ok_or(CoordinateError::Empty)?;
        let parts: Vec<&str> = tuple.split(',').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(CoordinateError::Shape(tuple.to_string()));
        }

        let number = |s: &str| {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CoordinateError::Number(s.to_string()))
        };

        Ok(Self {
            lon: number(parts[0])?,
            lat: number(parts[1])?,
        })
    }

    pub fn swap(self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lon,
        }
    }
}

/// An output-order coordinate pair. Displays as `lat,lng`, the composite
/// key used in option values and routing links.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
