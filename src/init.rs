//! Site initialization.
//!
//! Creates a new site skeleton: default configuration, the template set,
//! a sample post, and the assets directory. Skeleton files are embedded at
//! compile time.

use crate::config::SiteConfig;
use crate::log;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "loma.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &[
    "content/posts",
    "templates/partials",
    "templates/posts",
    "assets",
];

/// Files written into a fresh site, relative to the project root.
pub(crate) const SITE_FILES: &[(&str, &str)] = &[
    ("templates/base.html", include_str!("embed/templates/base.html")),
    (
        "templates/partials/nav.html",
        include_str!("embed/templates/partials/nav.html"),
    ),
    ("templates/index.html", include_str!("embed/templates/index.html")),
    (
        "templates/posts/post.html",
        include_str!("embed/templates/posts/post.html"),
    ),
    (
        "templates/posts/index.html",
        include_str!("embed/templates/posts/index.html"),
    ),
    ("content/posts/welcome.md", include_str!("embed/content/welcome.md")),
    ("assets/style.css", include_str!("embed/assets/style.css")),
];

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `loma init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_site_files(root)?;
    init_default_config(root)?;

    log!("init"; "site created at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `loma init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the embedded skeleton files
fn init_site_files(root: &Path) -> Result<()> {
    for (rel, contents) in SITE_FILES {
        let path = root.join(rel);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
