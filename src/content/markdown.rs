//! Markdown to HTML conversion.
//!
//! pulldown-cmark with the GFM extensions (tables, strikethrough, task
//! lists). Raw HTML in the source passes through unchanged per the
//! CommonMark spec; the resulting fragment is inserted into templates as
//! trusted markup with no second pass of escaping.

use pulldown_cmark::{Options, Parser, html::push_html};
use thiserror::Error;

/// Markdown conversion failure.
///
/// Callers degrade to an empty fragment instead of aborting the build.
/// Conversion itself cannot fail with the current engine on `&str` input;
/// the type is the seam the degrade path is written against.
#[derive(Debug, Error)]
#[error("markdown conversion failed: {0}")]
pub struct RenderError(pub String);

/// Convert a markdown body into an HTML fragment.
///
/// Deterministic: identical input yields byte-identical output.
pub fn render(markdown: &str) -> Result<String, RenderError> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::with_capacity(markdown.len() * 2);
    push_html(&mut html, parser);
    Ok(html)
}
