/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Travel modes and routing deep-links.

use crate::geo::LatLng;
use crate::option::RouteOption;
use serde::{Deserialize, Serialize};
use url::Url;

const APPLE_MAPS: &str = "http://maps.apple.com/";
const GOOGLE_DIRECTIONS: &str = "https://www.google.com/maps/dir/";
const GOOGLE_SEARCH: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Transit,
    Driving,
    Walking,
}

impl TravelMode {
    /// Map a numeric selector code. Unknown codes fall back to transit.
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => TravelMode::Driving,
            3 => TravelMode::Walking,
            _ => TravelMode::Transit,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TravelMode::Transit => 1,
            TravelMode::Driving => 2,
            TravelMode::Walking => 3,
        }
    }

    /// Apple Maps `dirflg` value.
    pub fn apple_flag(self) -> &'static str {
        match self {
            TravelMode::Transit => "r",
            TravelMode::Driving => "d",
            TravelMode::Walking => "w",
        }
    }

    /// Google Maps `travelmode` value.
    pub fn google_mode(self) -> &'static str {
        match self {
            TravelMode::Transit => "transit",
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        }
    }
}

/// The pair of deep-links shown after pressing Route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLinks {
    pub apple: String,
    pub google: String,
}

impl RouteLinks {
    /// Build both links. The current-location entry contributes an empty
    /// endpoint, which both services read as "my location".
    pub fn build(from: &RouteOption, to: &RouteOption, mode: TravelMode) -> Self {
        let (from, to) = (from.value(), to.value());
        // Coordinates are plain `lat,lng` text; the services expect the comma unescaped.
        Self {
            apple: format!(
                "{APPLE_MAPS}?saddr={from}&daddr={to}&dirflg={}",
                mode.apple_flag()
            ),
            google: format!(
                "{GOOGLE_DIRECTIONS}?api=1&origin={from}&destination={to}&travelmode={}",
                mode.google_mode()
            ),
        }
    }
}

/// A map-search link for a coordinate, used when no place details exist.
pub fn search_link(position: LatLng) -> String {
    match Url::parse(GOOGLE_SEARCH) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("api", "1")
                .append_pair("query", &position.to_string());
            url.into()
        }
        Err(_) => format!("{GOOGLE_SEARCH}?api=1&query={position}"),
    }
}
