/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use kmlroute_core::MalformedEntity;
use thiserror::Error;

/// Errors that stop a build.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("cannot read document {id}: {cause}")]
    SourceUnavailable { id: String, cause: String },

    #[error("configuration error in {path}: {message}")]
    Config { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ProcessorError {
    pub fn source_unavailable(id: impl Into<String>, cause: impl ToString) -> Self {
        ProcessorError::SourceUnavailable {
            id: id.into(),
            cause: cause.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProcessorError {
    fn from(e: serde_json::Error) -> Self {
        ProcessorError::Serialization(e.to_string())
    }
}

/// Per-entity conditions that degrade a field and let the build continue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Issue {
    #[error("skipped {0}")]
    MalformedEntity(MalformedEntity),

    #[error("style {reference} for {point} does not resolve; using default")]
    StyleUnresolved { point: String, reference: String },

    #[error("no place id for {point}: {reason}")]
    IdentifierUnresolved { point: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
