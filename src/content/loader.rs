//! Content loader - indexes dated post bundles from the content directory

use indexmap::IndexSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::error::ContentError;
use super::{FrontMatter, MarkdownRenderer, Params, Post};

/// Index every post under `root`.
///
/// `root` holds one directory per bundle, named `YYYY-MM-DD`, and each bundle
/// holds the post files published under that date. Bundles are visited in
/// name order and files in name order within a bundle. The first error
/// aborts the whole index.
pub fn index_posts(root: &Path, renderer: &MarkdownRenderer) -> Result<Vec<Post>, ContentError> {
    let mut posts = Vec::new();
    let mut bundles = 0;

    for bundle in children(root)? {
        if !bundle.file_type().is_dir() {
            return Err(ContentError::UnexpectedEntry {
                path: bundle.into_path(),
            });
        }
        let (year, month, day) = parse_bundle_name(bundle.path())?;
        bundles += 1;

        for entry in children(bundle.path())? {
            if !entry.file_type().is_file() {
                return Err(ContentError::UnexpectedEntry {
                    path: entry.into_path(),
                });
            }
            let slug = slug_for(entry.path())?;
            let params = Params::new(year, month, day, slug);
            let post = load_post(entry.into_path(), params, renderer)?;
            tracing::debug!("Indexed {}", post.params.path());
            posts.push(post);
        }
    }

    tracing::info!("Indexed {} posts from {} bundles", posts.len(), bundles);
    Ok(posts)
}

/// Distinct categories in order of first appearance
pub fn collect_categories(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter_map(|post| post.metadata.category.as_deref())
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Load a single post from a file
fn load_post(path: PathBuf, params: Params, renderer: &MarkdownRenderer) -> Result<Post, ContentError> {
    let source = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;

    let (metadata, body) = FrontMatter::parse(&source).map_err(|source| ContentError::FrontMatter {
        path: path.clone(),
        source,
    })?;

    let html = renderer.render(body).map_err(|source| ContentError::Render {
        path: path.clone(),
        source,
    })?;

    Ok(Post {
        markdown: body.to_string(),
        path,
        metadata,
        html,
        params,
    })
}

/// Immediate, non-hidden children of `dir`, sorted by file name
fn children(dir: &Path) -> Result<Vec<DirEntry>, ContentError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if is_hidden(&entry) {
            tracing::debug!("Skipping hidden entry {:?}", entry.path());
            continue;
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> Result<&str, ContentError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ContentError::InvalidFileName {
            path: path.to_path_buf(),
        })
}

/// Split a bundle directory name like `2024-03-05` into its date parts
fn parse_bundle_name(path: &Path) -> Result<(&str, &str, &str), ContentError> {
    let name = file_name(path)?;
    let malformed = || ContentError::MalformedBundle {
        path: path.to_path_buf(),
        name: name.to_string(),
    };

    let parts: Vec<&str> = name.split('-').collect();
    let [year, month, day] = parts[..] else {
        return Err(malformed());
    };
    let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !(is_number(year) && is_number(month) && is_number(day)) {
        return Err(malformed());
    }

    Ok((year, month, day))
}

/// File name with its `.md` extension removed
fn slug_for(path: &Path) -> Result<&str, ContentError> {
    let name = file_name(path)?;
    Ok(name.strip_suffix(".md").unwrap_or(name))
}
