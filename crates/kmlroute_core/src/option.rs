/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The flattened option list handed from the build pipeline to the page.

use crate::geo::LatLng;
use crate::place::PlaceId;
use crate::style::ResolvedStyle;
use serde::{Deserialize, Serialize};

pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// A category tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub index: usize,
    pub name: String,
}

/// One selectable entry in the from/to selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    pub label: String,
    /// `None` only for the current-location entry.
    pub coordinates: Option<LatLng>,
    pub group: Option<usize>,
    pub style: ResolvedStyle,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub place_id: Option<PlaceId>,
}

impl RouteOption {
    pub fn current_location() -> Self {
        Self {
            label: CURRENT_LOCATION_LABEL.to_string(),
            coordinates: None,
            group: None,
            style: ResolvedStyle::unresolved(),
            place_id: None,
        }
    }

    /// The composite `lat,lng` key, empty for the current location.
    pub fn value(&self) -> String {
        self.coordinates.map(|c| c.to_string()).unwrap_or_default()
    }

    /// Whether the option survives a filter. Entries without a group are
    /// always visible.
    pub fn is_visible_under(&self, active: impl Fn(usize) -> bool) -> bool {
        match self.group {
            Some(group) => active(group),
            None => true,
        }
    }
}

/// Everything the page needs: tabs plus the full, unfiltered option list.
///
/// `options[0]` is always the current-location entry; point options follow
/// in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionModel {
    /// Source-document identity; also keys persisted filter state.
    pub document_id: String,
    pub title: String,
    pub groups: Vec<GroupInfo>,
    pub options: Vec<RouteOption>,
}

impl OptionModel {
    /// Assemble a model, prepending the current-location entry once.
    pub fn new(
        document_id: impl Into<String>,
        title: impl Into<String>,
        groups: Vec<GroupInfo>,
        points: Vec<RouteOption>,
    ) -> Self {
        let mut options = Vec::with_capacity(points.len() + 1);
        options.push(RouteOption::current_location());
        options.extend(points);
        Self {
            document_id: document_id.into(),
            title: title.into(),
            groups,
            options,
        }
    }

    /// Point options, without the current-location entry.
    pub fn points(&self) -> &[RouteOption] {
        self.options.get(1..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, group: usize) -> RouteOption {
        RouteOption {
            label: label.to_string(),
            coordinates: Some(LatLng::new(35.0, 139.0)),
            group: Some(group),
            style: ResolvedStyle::unresolved(),
            place_id: None,
        }
    }

    #[test]
    fn test_current_location_prepended_once() {
        let model = OptionModel::new(
            "mid",
            "Trip",
            vec![],
            vec![point("a", 0), point("b", 1)],
        );
        assert_eq!(model.options.len(), 3);
        assert_eq!(model.options[0], RouteOption::current_location());
        assert_eq!(model.points().len(), 2);
        assert_eq!(
            model.options.iter().filter(|o| o.coordinates.is_none()).count(),
            1
        );
    }

    #[test]
    fn test_value_is_lat_lng_key() {
        assert_eq!(point("a", 0).value(), "35,139");
        assert_eq!(RouteOption::current_location().value(), "");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(point("a", 2)).unwrap();
        assert_eq!(json["label"], "a");
        assert_eq!(json["group"], 2);
        assert_eq!(json["coordinates"]["lat"], 35.0);
        assert_eq!(json["style"]["color"], "default");
        assert!(json.get("placeId").is_none());
    }
}
