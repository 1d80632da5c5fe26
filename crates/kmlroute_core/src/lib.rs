/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Core types for kmlroute.
//!
//! The typed document model (groups of points lifted from a KML export),
//! the resolved per-point data (style, place id), the flattened option list
//! that crosses from the build pipeline into the page, and the route-picker
//! [`controller::Controller`] that consumes it.

pub mod controller;
pub mod document;
pub mod geo;
pub mod option;
pub mod place;
pub mod route;
pub mod style;

pub use controller::{Controller, FilterStore, MemoryStore};
pub use document::{Document, Group, MalformedEntity, Point};
pub use geo::{LatLng, LonLat};
pub use option::{GroupInfo, OptionModel, RouteOption};
pub use place::{PlaceDetails, PlaceId};
pub use route::{RouteLinks, TravelMode};
pub use style::{ResolvedStyle, StyleColor};
