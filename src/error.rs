//! Build pipeline error types.
//!
//! Per-document failures (`MalformedDocument`, `MetadataDecode`,
//! `DuplicateSlug`) skip that document; `Template` aborts a single render
//! step; `Io` during directory creation is fatal for the stage that needed
//! the directory. The orchestrator aggregates these into the build summary
//! instead of returning early.

use crate::content::front_matter::MalformedDocument;
use crate::content::metadata::MetadataDecodeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building the site.
///
/// Markdown conversion failures are not here: they degrade to an empty
/// fragment and travel as [`crate::content::LoadedPage::render_error`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed document")]
    MalformedDocument(#[from] MalformedDocument),

    #[error("front matter metadata could not be decoded")]
    MetadataDecode(#[from] MetadataDecodeError),

    #[error("template error")]
    Template(#[from] tera::Error),

    #[error("slug `{0}` is already used by another document")]
    DuplicateSlug(String),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Render an error and its source chain on one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    use std::fmt::Write;

    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        write!(out, ": {cause}").ok();
        source = cause.source();
    }
    out
}
