//! Generator module - writes the static site from an indexed snapshot

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{MarkdownRenderer, Site};
use crate::templates::{self, STYLESHEET_PATH};
use crate::Blog;

/// Static site generator
pub struct Generator<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: blog.renderer(),
        }
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self, site: &Site) -> Result<usize> {
        let public_dir = &self.blog.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let mut written = 0;
        written += self.generate_index(site)?;
        written += self.generate_post_pages(site)?;
        written += self.generate_category_pages(site)?;
        self.generate_stylesheet()?;

        Ok(written)
    }

    fn generate_index(&self, site: &Site) -> Result<usize> {
        let html = templates::index_page(&self.blog.config, site);
        write_file(&self.blog.public_dir.join("index.html"), &html)?;
        Ok(1)
    }

    /// Posts whose params are shared by another post are skipped, matching
    /// what the preview server answers for them
    fn generate_post_pages(&self, site: &Site) -> Result<usize> {
        let mut written = 0;
        for post in site.posts() {
            if site.post_by_params(&post.params).is_none() {
                tracing::warn!(
                    "Skipping {:?}: another post is also addressed by {}",
                    post.path,
                    post.params.path()
                );
                continue;
            }

            let html = templates::post_page(&self.blog.config, site, post);
            let path = self
                .blog
                .public_dir
                .join(post.params.path())
                .join("index.html");
            write_file(&path, &html)?;
            tracing::debug!("Generated {:?}", path);
            written += 1;
        }
        Ok(written)
    }

    fn generate_category_pages(&self, site: &Site) -> Result<usize> {
        let mut written = 0;
        for category in site.categories() {
            let Some(slug) = site.category_slug(category) else {
                continue;
            };
            let posts: Vec<_> = site.posts_in_category(category).collect();
            let html = templates::category_page(&self.blog.config, category, &posts);
            let path = self
                .blog
                .public_dir
                .join(templates::category_path(slug))
                .join("index.html");
            write_file(&path, &html)?;
            written += 1;
        }
        Ok(written)
    }

    fn generate_stylesheet(&self) -> Result<()> {
        let css = self.renderer.stylesheet()?;
        write_file(&self.blog.public_dir.join(STYLESHEET_PATH), &css)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
