//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── Composer::from_dir() ──► named template registry, validated
//!     ├── landing page ─────────► <output>/index.html
//!     ├── collect_posts() ──────► Loader per file ──► Site collection
//!     │                           (failures recorded, drafts filtered)
//!     ├── per page ─────────────► <output>/posts/<slug>.html
//!     ├── post index ───────────► <output>/posts/index.html
//!     └── copy_assets() ────────► <output>/assets
//! ```
//!
//! Per-document and per-page failures are recorded in the [`BuildSummary`]
//! and logged; the build continues with the remaining work. Only directory
//! creation is fatal, and completed writes are never rolled back.

use crate::assets::copy_assets;
use crate::compose::Composer;
use crate::config::SiteConfig;
use crate::content::{Page, load_page};
use crate::error::{BuildError, error_chain};
use crate::log;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One recorded per-document or per-page failure.
#[derive(Debug)]
pub struct BuildFailure {
    pub path: PathBuf,
    pub error: BuildError,
}

/// Aggregated result of one build pass.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub pages_written: usize,
    pub drafts_skipped: usize,
    pub failures: Vec<BuildFailure>,
}

impl BuildSummary {
    fn record(&mut self, path: PathBuf, error: BuildError) {
        self.failures.push(BuildFailure { path, error });
    }

    fn written(&mut self) {
        self.pages_written += 1;
    }

    /// Log the outcome of a build pass, one line per recorded failure.
    pub fn report(&self) {
        for failure in &self.failures {
            log!("error"; "{}: {}", failure.path.display(), error_chain(&failure.error));
        }
        if self.drafts_skipped > 0 {
            log!("content"; "skipped {} drafts", self.drafts_skipped);
        }
        if self.failures.is_empty() {
            log!("build"; "done, {} pages written", self.pages_written);
        } else {
            log!("warn"; "finished with {} failures, {} pages written",
                self.failures.len(), self.pages_written);
        }
    }
}

/// Build the entire site: landing page, posts, post index, assets.
///
/// Fully sequential; pages are written in discovery order. If `clean` is
/// true the output directory is removed first. Completed writes persist
/// even when a later step fails.
pub fn build_site(config: &SiteConfig, clean: bool) -> Result<BuildSummary> {
    let output = config.output_dir();

    if clean && output.exists() {
        fs::remove_dir_all(&output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }

    let composer = Composer::from_dir(&config.templates_dir(), config.site.clone())?;
    let mut summary = BuildSummary::default();

    // ========================================================================
    // Landing page
    // ========================================================================
    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    match composer.landing_page() {
        Ok(bytes) => write_output(&output.join("index.html"), &bytes, &mut summary),
        Err(err) => summary.record(output.join("index.html"), err),
    }

    // ========================================================================
    // Site collection
    // ========================================================================
    let posts_dir = config.posts_dir();
    let sources = collect_posts(&posts_dir);
    log!("content"; "found {} posts in {}", sources.len(), posts_dir.display());

    let mut pages: Vec<Page> = Vec::new();
    let mut seen_slugs: HashSet<String> = HashSet::new();

    for path in &sources {
        match load_page(path) {
            Ok(loaded) => {
                if let Some(err) = loaded.render_error {
                    log!("warn"; "{}: {}", path.display(), err);
                }
                if loaded.page.draft {
                    summary.drafts_skipped += 1;
                    continue;
                }
                if !seen_slugs.insert(loaded.page.slug.clone()) {
                    summary.record(path.clone(), BuildError::DuplicateSlug(loaded.page.slug));
                    continue;
                }
                pages.push(loaded.page);
            }
            Err(err) => summary.record(path.clone(), err),
        }
    }

    // ========================================================================
    // Post pages and post index
    // ========================================================================
    let posts_output = output.join("posts");
    fs::create_dir_all(&posts_output).with_context(|| {
        format!("Failed to create posts directory: {}", posts_output.display())
    })?;

    for page in &pages {
        let out_path = posts_output.join(format!("{}.html", page.slug));
        match composer.post_page(page) {
            Ok(bytes) => write_output(&out_path, &bytes, &mut summary),
            Err(err) => summary.record(out_path, err),
        }
    }

    match composer.post_index(&pages) {
        Ok(bytes) => write_output(&posts_output.join("index.html"), &bytes, &mut summary),
        Err(err) => summary.record(posts_output.join("index.html"), err),
    }

    // ========================================================================
    // Assets
    // ========================================================================
    match copy_assets(&config.assets_dir(), &output.join("assets")) {
        Ok(0) => {}
        Ok(copied) => log!("assets"; "copied {copied} files"),
        Err(err) => summary.record(config.assets_dir(), err),
    }

    Ok(summary)
}

/// Markdown sources directly inside the posts directory, in the order the
/// filesystem returns them. Not recursive, not sorted.
fn collect_posts(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Write rendered bytes, recording success or failure in the summary.
fn write_output(path: &Path, bytes: &[u8], summary: &mut BuildSummary) {
    match fs::write(path, bytes) {
        Ok(()) => summary.written(),
        Err(err) => summary.record(path.to_path_buf(), BuildError::Io(path.to_path_buf(), err)),
    }
}
