/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fs;
use std::path::{Path, PathBuf};

use kmlroute_core::OptionModel;

use crate::ProcessorError;

/// The page path for an output name: `{output}.html`.
pub fn page_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".html");
    PathBuf::from(name)
}

/// Write a rendered page next to `output`, returning the written path.
pub fn write_page(output: &Path, html: &str) -> Result<PathBuf, ProcessorError> {
    let path = page_path(output);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html)?;
    Ok(path)
}

/// Pretty JSON for `--json` output.
pub fn model_to_json(model: &OptionModel) -> Result<String, ProcessorError> {
    Ok(serde_json::to_string_pretty(model)?)
}
