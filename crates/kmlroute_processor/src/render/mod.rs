/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Page rendering.
//!
//! The produced page is self-contained apart from the map widget script:
//! markup, stylesheet, embedded option data and the controller script.

pub mod page;

pub use page::{render_page, PageOptions};

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize a value for a `<script type="application/json">` block.
///
/// `<` is written as `\u003c` so a `</script>` inside a label cannot close
/// the block; the JSON parses back to the same value.
pub fn embed_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}
