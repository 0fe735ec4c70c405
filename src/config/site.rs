//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Daybook".to_string(),
            author: String::new(),
            root: "/".to_string(),
            content_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Site-relative URL for `path`, honoring `root`
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Markdown pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// syntect theme used for the generated stylesheet
    pub theme: String,
    /// Separate top-level blocks with blank lines
    pub pretty: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            pretty: false,
        }
    }
}
