//! The indexed site: an immutable snapshot of every post

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::error::ContentError;
use super::loader::{collect_categories, index_posts};
use super::{find_post, MarkdownRenderer, Params, Post};

/// Posts and categories, built once and only read afterwards
#[derive(Debug, Clone, Default, Serialize)]
pub struct Site {
    posts: Vec<Post>,
    categories: Vec<String>,
    /// Category name -> unique, non-empty URL slug
    #[serde(skip)]
    category_slugs: IndexMap<String, String>,
}

impl Site {
    /// Index `content_dir` and derive the category list
    pub fn load(content_dir: &Path, renderer: &MarkdownRenderer) -> Result<Self, ContentError> {
        let posts = index_posts(content_dir, renderer)?;
        Ok(Self::from_posts(posts))
    }

    pub fn from_posts(posts: Vec<Post>) -> Self {
        let categories = collect_categories(&posts);
        let category_slugs = assign_category_slugs(&categories);
        Self {
            posts,
            categories,
            category_slugs,
        }
    }

    /// All posts in index order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// URL slug of `category`; distinct categories never share a slug
    pub fn category_slug(&self, category: &str) -> Option<&str> {
        self.category_slugs.get(category).map(String::as_str)
    }

    /// The category published under `slug`
    pub fn category_by_slug(&self, slug: &str) -> Option<&str> {
        self.category_slugs
            .iter()
            .find(|(_, assigned)| assigned.as_str() == slug)
            .map(|(name, _)| name.as_str())
    }

    /// The post addressed by `params`, or `None` if it is missing or ambiguous
    pub fn post_by_params(&self, params: &Params) -> Option<&Post> {
        find_post(&self.posts, params)
    }

    /// Posts filed under `category`, in index order
    pub fn posts_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts
            .iter()
            .filter(move |post| post.metadata.category.as_deref() == Some(category))
    }

    /// Posts ordered newest bundle first; undated bundles sink to the end
    pub fn posts_newest_first(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.params.date().cmp(&a.params.date()));
        posts
    }
}

/// Slugify each category, numbering repeats (`dev-notes`, `dev-notes-2`).
///
/// Names that slugify to nothing fall back to `category`.
fn assign_category_slugs(categories: &[String]) -> IndexMap<String, String> {
    let mut slugs = IndexMap::with_capacity(categories.len());
    let mut taken = std::collections::HashSet::new();

    for category in categories {
        let mut base = slug::slugify(category);
        if base.is_empty() {
            base = "category".to_string();
        }

        let mut candidate = base.clone();
        let mut n = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        if candidate != slug::slugify(category) {
            tracing::warn!("Category {:?} published as {:?}", category, candidate);
        }
        slugs.insert(category.clone(), candidate);
    }

    slugs
}
