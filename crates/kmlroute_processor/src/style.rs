/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Style resolution.
//!
//! KML exports describe each marker style twice: a concrete `<Style>` per
//! state (`…-normal`, `…-highlight`) and a `<StyleMap>` that names which
//! concrete style applies in which state. Placemarks usually point at the
//! map. Only the `normal` state is used here.
//!
//! An alias may only target a definition, never another alias, so
//! resolution takes at most one hop. [`StyleRef`] makes the two cases
//! explicit.

use indexmap::IndexMap;
use kml_source::model::{Style, StyleMap};
use kmlroute_core::{ResolvedStyle, StyleColor};

const NORMAL: &str = "normal";
const ICON_PREFIX: &str = "icon-";

/// A retained `normal` style definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDef {
    pub id: String,
    pub icon_href: Option<String>,
    /// Source `aabbggrr` color.
    pub raw_color: Option<String>,
    pub rgb: Option<String>,
    pub icon_number: Option<u32>,
}

impl StyleDef {
    fn from_source(id: &str, style: &Style) -> Self {
        let icon = style.icon.as_ref();
        let raw_color = icon.and_then(|i| i.color.clone());
        Self {
            id: id.to_string(),
            icon_href: icon.and_then(|i| i.href.clone()),
            rgb: raw_color.as_deref().and_then(abgr_to_rgb),
            raw_color,
            icon_number: icon_number(id),
        }
    }

    pub fn resolved(&self) -> ResolvedStyle {
        ResolvedStyle {
            color: self
                .rgb
                .clone()
                .map(StyleColor::Rgb)
                .unwrap_or(StyleColor::Default),
            icon_href: self.icon_href.clone(),
            icon_number: self.icon_number,
        }
    }
}

/// How a style id was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRef<'a> {
    Direct(&'a StyleDef),
    Alias { alias: &'a str, def: &'a StyleDef },
}

impl<'a> StyleRef<'a> {
    pub fn def(&self) -> &'a StyleDef {
        match self {
            StyleRef::Direct(def) => def,
            StyleRef::Alias { def, .. } => def,
        }
    }
}

/// Lookup table over a document's style definitions and aliases.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    defs: IndexMap<String, StyleDef>,
    /// Alias id to the id of a key in `defs`.
    aliases: IndexMap<String, String>,
}

impl StyleSheet {
    pub fn new(styles: &[Style], style_maps: &[StyleMap]) -> Self {
        let mut defs = IndexMap::new();
        for style in styles {
            let Some(id) = style.id.as_deref() else { continue };
            if id.contains(NORMAL) {
                defs.insert(id.to_string(), StyleDef::from_source(id, style));
            }
        }

        let mut aliases = IndexMap::new();
        for map in style_maps {
            let Some(id) = map.id.as_deref() else { continue };
            let target = map
                .pairs
                .iter()
                .find(|p| p.key.as_deref() == Some(NORMAL))
                .and_then(|p| p.style_url.as_deref())
                .map(strip_hash);
            if let Some(target) = target {
                if defs.contains_key(target) {
                    aliases.insert(id.to_string(), target.to_string());
                }
            }
        }

        Self { defs, aliases }
    }

    /// Look up a `styleUrl`, with or without its leading `#`.
    ///
    /// Aliases shadow a definition with the same id.
    pub fn lookup(&self, reference: &str) -> Option<StyleRef<'_>> {
        let id = strip_hash(reference);
        if let Some((alias, target)) = self.aliases.get_key_value(id) {
            return self
                .defs
                .get(target)
                .map(|def| StyleRef::Alias {
                    alias: alias.as_str(),
                    def,
                });
        }
        self.defs.get(id).map(StyleRef::Direct)
    }

    /// Resolve a reference, or `None` when it names nothing usable.
    pub fn resolve(&self, reference: &str) -> Option<ResolvedStyle> {
        self.lookup(reference).map(|r| r.def().resolved())
    }

    pub fn def_count(&self) -> usize {
        self.defs.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

fn strip_hash(reference: &str) -> &str {
    reference.trim().trim_start_matches('#')
}

/// Convert an `aabbggrr` color to `#RRGGBB`.
///
/// Reads the byte pairs in reverse and drops alpha; anything that is not
/// exactly eight hex digits gives `None`.
pub fn abgr_to_rgb(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}{}{}", &raw[6..8], &raw[4..6], &raw[2..4]).to_ascii_uppercase())
}

/// The digits right after `icon-` in a style id.
pub fn icon_number(id: &str) -> Option<u32> {
    let start = id.find(ICON_PREFIX)? + ICON_PREFIX.len();
    let digits: String = id[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Color read straight off a style id such as `icon-1899-0288D1`, without
/// consulting any definitions. Used when style resolution is switched off.
pub fn color_from_reference(reference: &str) -> StyleColor {
    strip_hash(reference)
        .split('-')
        .nth(2)
        .filter(|s| s.len() == 6 && s.bytes().all(|b| b.is_ascii_hexdigit()))
        .map(|hex| StyleColor::Rgb(format!("#{}", hex.to_ascii_uppercase())))
        .unwrap_or(StyleColor::Default)
}
