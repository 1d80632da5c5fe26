/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The route-picker page.

use super::{embed_json, escape_html};
use crate::config::Config;
use crate::error::Result;
use kmlroute_core::controller::storage_key;
use kmlroute_core::{OptionModel, RouteOption, TravelMode};
use serde::Serialize;
use std::fmt::Write;

const STYLESHEET: &str = include_str!("../../assets/page.css");
const CONTROLLER_SCRIPT: &str = include_str!("../../assets/page.js");
const MAPS_SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Page-level settings that are not part of the option model.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    /// Linked from the heading.
    pub viewer_url: Option<String>,
    /// Browser key for the map widget. Without one the page has no map and
    /// the marker info falls back to nothing; routing still works.
    pub maps_js_key: Option<String>,
    /// Whether the page keeps the group filter in local storage.
    pub persist: bool,
    pub zoom: u8,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            viewer_url: None,
            maps_js_key: None,
            persist: true,
            zoom: kmlroute_core::controller::DEFAULT_ZOOM,
        }
    }
}

impl PageOptions {
    pub fn from_config(config: &Config, document_id: &str) -> Self {
        let key = config.maps_js_key();
        Self {
            viewer_url: Some(config.viewer_url(document_id)),
            maps_js_key: (!key.is_empty()).then(|| key.to_string()),
            persist: config.features.persist_filters,
            zoom: config.page.zoom,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    model: &'a OptionModel,
    persist: bool,
    zoom: u8,
    storage_key: String,
}

/// Render the complete page for one model.
pub fn render_page(model: &OptionModel, options: &PageOptions) -> Result<String> {
    let data = embed_json(&PageData {
        model,
        persist: options.persist,
        zoom: options.zoom,
        storage_key: storage_key(&model.document_id),
    })?;

    let title = escape_html(&model.title);
    let heading = match &options.viewer_url {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{title}</a>"#,
            escape_html(url)
        ),
        None => title.clone(),
    };

    let mut html = String::with_capacity(8 * 1024 + data.len());
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{STYLESHEET}</style>
</head>
<body>
<div class="container">
<h1>{heading}</h1>
{tabs}
<div class="field"><label for="from">From</label><select id="from">{choices}</select></div>
<div class="field"><label for="to">To</label><select id="to">{choices}</select></div>
{modes}
<button id="route" type="button">Route</button>
<div class="panel"><h3><span class="service">Apple</span>Apple Maps</h3><div class="body" id="route-apple">No Route Yet</div></div>
<div class="panel"><h3><span class="service">Google</span>Google Maps</h3><div class="body" id="route-google">No Route Yet</div></div>
<div id="map"></div>
</div>
<script type="application/json" id="kmlroute-data">{data}</script>
<script>
{CONTROLLER_SCRIPT}</script>
"#,
        tabs = render_tabs(model),
        choices = render_choices(&model.options),
        modes = render_modes(),
    );

    if let Some(key) = &options.maps_js_key {
        let _ = writeln!(
            html,
            r#"<script async src="{MAPS_SCRIPT_URL}?key={}&amp;libraries=places&amp;callback=kmlrouteInit"></script>"#,
            escape_html(key)
        );
    }
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn render_tabs(model: &OptionModel) -> String {
    let mut out = String::from(r#"<ul class="tabs">"#);
    for group in &model.groups {
        let _ = write!(
            out,
            r##"<li class="active"><a href="#" data-group="{}">{}</a></li>"##,
            group.index,
            escape_html(&group.name)
        );
    }
    out.push_str("</ul>");
    out
}

/// Server-side choices for the unfiltered list; the script rebuilds them
/// once the persisted filter is known.
fn render_choices(options: &[RouteOption]) -> String {
    let mut out = String::new();
    for (index, option) in options.iter().enumerate() {
        let style = if option.style.color.is_default() {
            String::new()
        } else {
            format!(r#" style="color:{}""#, escape_html(option.style.color.as_str()))
        };
        let _ = write!(
            out,
            r#"<option value="{index}"{style}>{}</option>"#,
            escape_html(&option.label)
        );
    }
    out
}

fn render_modes() -> String {
    let mut out = String::from(r#"<div class="modes">"#);
    for (mode, label) in [
        (TravelMode::Transit, "Transit"),
        (TravelMode::Driving, "Driving"),
        (TravelMode::Walking, "Walking"),
    ] {
        let checked = if mode == TravelMode::default() {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<label><input type="radio" name="mode" value="{}"{checked}> {label}</label> "#,
            mode.code()
        );
    }
    out.push_str("</div>");
    out
}
