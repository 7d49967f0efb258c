//! Document loading: one source file to one `Page`.

use crate::content::markdown::RenderError;
use crate::content::metadata::PostDate;
use crate::content::{front_matter, markdown, metadata};
use crate::error::BuildError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A fully loaded content page. Constructed once, immutable thereafter.
///
/// `Serialize` so the page can flow straight into a template context.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub date: Option<PostDate>,
    pub tags: Vec<String>,
    pub slug: String,
    pub summary: Option<String>,
    /// Rendered HTML body, trusted as raw markup by templates.
    pub content: String,
    pub draft: bool,
}

/// Result of loading one source file.
#[derive(Debug)]
pub struct LoadedPage {
    pub page: Page,
    /// Set when markdown conversion failed and the body degraded to an
    /// empty fragment.
    pub render_error: Option<RenderError>,
}

/// Read a source file and run it through the content pipeline.
///
/// Read, extraction, and decode failures are returned to the caller, which
/// skips the document and moves on. A renderer failure degrades the body to
/// an empty fragment, reported through [`LoadedPage::render_error`]. Draft
/// filtering is the orchestrator's job; the page is built either way.
pub fn load_page(path: &Path) -> Result<LoadedPage, BuildError> {
    let raw = fs::read_to_string(path).map_err(|err| BuildError::Io(path.to_path_buf(), err))?;

    let document = front_matter::extract(&raw)?;
    let meta = metadata::decode(document.front_matter)?;

    let (content, render_error) = match markdown::render(document.body) {
        Ok(html) => (html, None),
        Err(err) => (String::new(), Some(err)),
    };

    Ok(LoadedPage {
        page: Page {
            title: meta.title,
            date: meta.date,
            tags: meta.tags,
            slug: meta.slug,
            summary: meta.summary,
            content,
            draft: meta.draft,
        },
        render_error,
    })
}
