/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! External place identifiers and the detail records fetched with them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key understood by the place-detail service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Wrap a raw id. Blank input yields `None`: an empty id is the same as
    /// no id at all.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == raw.len() {
            Some(Self(raw))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields consumed from a place-detail response. Everything is optional;
/// the marker keeps the option label as its name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub rating: Option<f64>,
    /// Map-view link for the place.
    pub url: Option<String>,
    pub website: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_id_is_none() {
        assert!(PlaceId::new("").is_none());
        assert!(PlaceId::new("   ").is_none());
        assert_eq!(PlaceId::new(" ChIJ1 ").unwrap().as_str(), "ChIJ1");
    }
}
