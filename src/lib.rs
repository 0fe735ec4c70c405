//! daybook: a dated-bundle markdown blog
//!
//! Posts live in `<content_dir>/<YYYY-MM-DD>/<slug>.md`. Indexing turns that
//! tree into an immutable [`content::Site`] snapshot whose posts are rendered
//! to syntax-highlighted HTML and addressed by `(year, month, day, slug)`.
//! The snapshot feeds the static generator, the preview server and the CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod server;
pub mod templates;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use content::{MarkdownRenderer, Site};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the dated post bundles
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Markdown renderer configured for this site
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(&self.config.markdown)
    }

    /// Index every post; the returned snapshot is never modified
    pub fn load_site(&self) -> Result<Site> {
        let renderer = self.renderer();
        Site::load(&self.content_dir, &renderer)
            .with_context(|| format!("Failed to index posts in {:?}", self.content_dir))
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post in today's bundle
    pub fn new_post(&self, title: &str, category: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, category, None)
    }
}
