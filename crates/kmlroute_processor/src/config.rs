/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Build configuration, read from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Credentials live here instead of in the binary.

use crate::error::{ProcessorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Files looked for in the working directory when no path is given.
pub const PROJECT_CONFIG_FILES: [&str; 2] = [".kmlroute.toml", "kmlroute.toml"];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub places: PlacesConfig,

    #[serde(default)]
    pub features: Features,

    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Document URL; `{id}` is replaced with the document identifier.
    #[serde(default = "default_url_template")]
    pub url_template: String,

    /// Link shown in the page heading.
    #[serde(default = "default_viewer_template")]
    pub viewer_template: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacesConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_places_endpoint")]
    pub endpoint: String,

    /// Search radius in meters.
    #[serde(default = "default_radius")]
    pub radius: u32,

    #[serde(default = "default_category")]
    pub category: String,

    /// Lookups in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Minimum spacing between lookup requests.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Optional pipeline stages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Features {
    #[serde(default = "default_true")]
    pub style_resolution: bool,

    #[serde(default = "default_true")]
    pub identifier_fallback: bool,

    #[serde(default = "default_true")]
    pub persist_filters: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    /// Browser key for the map widget. Falls back to `places.api_key`.
    #[serde(default)]
    pub maps_js_key: String,

    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            viewer_template: default_viewer_template(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_places_endpoint(),
            radius: default_radius(),
            category: default_category(),
            concurrency: default_concurrency(),
            min_interval_ms: default_min_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::all()
    }
}

impl Features {
    /// Every stage enabled.
    pub fn all() -> Self {
        Self {
            style_resolution: true,
            identifier_fallback: true,
            persist_filters: true,
        }
    }

    /// Plain extraction: raw style ids, embedded place ids only, no persistence.
    pub fn minimal() -> Self {
        Self {
            style_resolution: false,
            identifier_fallback: false,
            persist_filters: false,
        }
    }
}

impl SourceConfig {
    pub fn document_url(&self, id: &str) -> String {
        self.url_template.replace("{id}", id)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            maps_js_key: String::new(),
            zoom: default_zoom(),
        }
    }
}

fn default_url_template() -> String {
    "http://www.google.com/maps/d/kml?forcekml=1&mid={id}".to_string()
}

fn default_viewer_template() -> String {
    "https://www.google.com/maps/d/viewer?mid={id}&hl=en&usp=sharing".to_string()
}

fn default_places_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
}

fn default_radius() -> u32 {
    100
}

fn default_category() -> String {
    "point_of_interest".to_string()
}

fn default_concurrency() -> usize {
    4
}

fn default_min_interval_ms() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_zoom() -> u8 {
    kmlroute_core::controller::DEFAULT_ZOOM
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ProcessorError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load the first project config file found in `dir`, if any.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        for name in PROJECT_CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                return Ok(Some(Self::load(&path)?));
            }
        }
        Ok(None)
    }

    pub fn viewer_url(&self, id: &str) -> String {
        self.source.viewer_template.replace("{id}", id)
    }

    /// The key handed to the page's map script.
    pub fn maps_js_key(&self) -> &str {
        if self.page.maps_js_key.is_empty() {
            &self.places.api_key
        } else {
            &self.page.maps_js_key
        }
    }

    /// Whether fallback lookups can actually run.
    pub fn lookup_enabled(&self) -> bool {
        self.features.identifier_fallback && !self.places.api_key.is_empty()
    }
}
