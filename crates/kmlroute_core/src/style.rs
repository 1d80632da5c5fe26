/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Resolved marker styles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel written in place of a color when no style resolves.
pub const DEFAULT_COLOR: &str = "default";

/// A marker color: `#RRGGBB` or the `default` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StyleColor {
    Rgb(String),
    #[default]
    Default,
}

impl StyleColor {
    pub fn as_str(&self) -> &str {
        match self {
            StyleColor::Rgb(hex) => hex,
            StyleColor::Default => DEFAULT_COLOR,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, StyleColor::Default)
    }
}

impl fmt::Display for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for StyleColor {
    fn from(s: String) -> Self {
        if s == DEFAULT_COLOR || s.is_empty() {
            StyleColor::Default
        } else {
            StyleColor::Rgb(s)
        }
    }
}

impl From<StyleColor> for String {
    fn from(c: StyleColor) -> Self {
        match c {
            StyleColor::Rgb(hex) => hex,
            StyleColor::Default => DEFAULT_COLOR.to_string(),
        }
    }
}

/// The visual style a point ends up with after alias resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub color: StyleColor,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon_number: Option<u32>,
}

impl ResolvedStyle {
    /// The style used when nothing resolves.
    pub fn unresolved() -> Self {
        Self::default()
    }
}
