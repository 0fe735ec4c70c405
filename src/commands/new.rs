//! Create a new post

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a post in today's bundle, returning its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    category: Option<&str>,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    create_post_on(blog, title, category, slug, today)
}

/// Create a post in the bundle for `date`
pub fn create_post_on(
    blog: &Blog,
    title: &str,
    category: Option<&str>,
    slug: Option<&str>,
    date: NaiveDate,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let bundle = date.format("%Y-%m-%d").to_string();
    let target_dir = blog.content_dir.join(&bundle);
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut front_matter = serde_yaml::Mapping::new();
    front_matter.insert("title".into(), title.into());
    if let Some(category) = category {
        front_matter.insert("category".into(), category.into());
    }
    front_matter.insert("dateCreated".into(), bundle.as_str().into());
    front_matter.insert("datePublished".into(), bundle.as_str().into());

    let content = format!("---\n{}---\n", serde_yaml::to_string(&front_matter)?);
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, Params};
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_create_post() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        let path = create_post_on(&blog, "Hello: World", Some("notes"), None, date()).unwrap();
        assert_eq!(path, tmp.path().join("posts/2024-03-05/hello-world.md"));

        let source = fs::read_to_string(&path).unwrap();
        let (metadata, body) = FrontMatter::parse(&source).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Hello: World"));
        assert_eq!(metadata.category.as_deref(), Some("notes"));
        assert_eq!(metadata.date_created.as_deref(), Some("2024-03-05"));
        assert_eq!(metadata.date_published.as_deref(), Some("2024-03-05"));
        assert_eq!(body, "");

        let site = blog.load_site().unwrap();
        assert!(site
            .post_by_params(&Params::new("2024", "03", "05", "hello-world"))
            .is_some());
    }

    #[test]
    fn test_explicit_slug() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        let path = create_post_on(&blog, "Whatever", None, Some("custom"), date()).unwrap();
        assert!(path.ends_with("2024-03-05/custom.md"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        create_post_on(&blog, "Twice", None, None, date()).unwrap();
        let err = create_post_on(&blog, "Twice", None, None, date()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert!(create_post_on(&blog, "???", None, None, date()).is_err());
    }
}
