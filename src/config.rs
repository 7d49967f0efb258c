//! Site configuration loading and validation.
//!
//! Configuration comes from `loma.toml` at the project root, decoded with
//! serde. CLI flags override file values; directory fields are stored
//! relative to the project root and resolved through the accessor methods.

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level site configuration, decoded from `loma.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub build: BuildSection,

    /// Project root. Set from the CLI, never from the config file.
    #[serde(skip)]
    root: PathBuf,
}

/// `[site]` section: values exposed to every template context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "My Site".to_owned(),
            base_url: String::new(),
            author: None,
        }
    }
}

/// `[build]` section: directory layout, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub content: PathBuf,
    pub templates: PathBuf,
    pub assets: PathBuf,
    pub output: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            templates: PathBuf::from("templates"),
            assets: PathBuf::from("assets"),
            output: PathBuf::from("public"),
        }
    }
}

impl SiteConfig {
    /// Read and decode a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Override file values with CLI flags.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(output) = &cli.output {
            self.build.output = output.clone();
        }
        if let Some(content) = &cli.content {
            self.build.content = content.clone();
        }
        if let Some(assets) = &cli.assets {
            self.build.assets = assets.clone();
        }
        if let Some(templates) = &cli.templates {
            self.build.templates = templates.clone();
        }
    }

    pub fn set_root(&mut self, root: PathBuf) {
        self.root = root;
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Content directory, resolved against the project root.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.build.content)
    }

    /// Markdown post sources live directly under `<content>/posts`.
    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir().join("posts")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.build.templates)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.build.assets)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Check the parts of the config a build depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".to_owned(),
            ));
        }

        for (name, dir) in [
            ("content", self.content_dir()),
            ("templates", self.templates_dir()),
        ] {
            if !dir.is_dir() {
                return Err(ConfigError::Validation(format!(
                    "{name} directory not found: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}
