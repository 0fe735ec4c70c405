//! Post model and lookup

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::frontmatter::Metadata;

/// Routing identity of a post: the bundle date plus the file slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Params {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

impl Params {
    pub fn new(
        year: impl Into<String>,
        month: impl Into<String>,
        day: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
            slug: slug.into(),
        }
    }

    /// The bundle date, if it names a real calendar day
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.year.parse().ok()?,
            self.month.parse().ok()?,
            self.day.parse().ok()?,
        )
    }

    /// URL path (without root), e.g. `2024/03/05/my-post/`
    pub fn path(&self) -> String {
        format!("{}/{}/{}/{}/", self.year, self.month, self.day, self.slug)
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Full source file path
    #[serde(skip)]
    pub path: PathBuf,

    pub metadata: Metadata,

    /// Raw markdown body, front-matter removed
    pub markdown: String,

    /// Rendered HTML content
    pub html: String,

    pub params: Params,
}

impl Post {
    /// Title from the front-matter, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.metadata
            .title
            .as_deref()
            .unwrap_or(&self.params.slug)
    }
}

/// Find the single post addressed by `params`.
///
/// Returns `None` both when nothing matches and when the tuple is ambiguous:
/// duplicated params are treated as missing rather than resolved.
pub fn find_post<'a>(posts: &'a [Post], params: &Params) -> Option<&'a Post> {
    let mut matches = posts.iter().filter(|post| &post.params == params);
    match (matches.next(), matches.next()) {
        (Some(post), None) => Some(post),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(params: Params, title: &str) -> Post {
        Post {
            path: PathBuf::from(format!("/posts/{}.md", params.slug)),
            metadata: Metadata {
                title: Some(title.to_string()),
                ..Default::default()
            },
            markdown: String::new(),
            html: String::new(),
            params,
        }
    }

    #[test]
    fn test_find_post() {
        let posts = vec![
            post(Params::new("2024", "03", "05", "a"), "A"),
            post(Params::new("2024", "03", "06", "b"), "B"),
        ];
        let found = find_post(&posts, &Params::new("2024", "03", "06", "b")).unwrap();
        assert_eq!(found.display_title(), "B");
    }

    #[test]
    fn test_find_post_requires_every_field() {
        let posts = vec![post(Params::new("2024", "03", "05", "a"), "A")];
        assert!(find_post(&posts, &Params::new("2024", "03", "06", "a")).is_none());
        assert!(find_post(&posts, &Params::new("2024", "04", "05", "a")).is_none());
        assert!(find_post(&posts, &Params::new("2023", "03", "05", "a")).is_none());
        assert!(find_post(&posts, &Params::new("2024", "03", "05", "missing")).is_none());
    }

    #[test]
    fn test_duplicate_params_are_not_found() {
        let params = Params::new("2024", "03", "05", "dup");
        let posts = vec![
            post(params.clone(), "First"),
            post(Params::new("2024", "03", "05", "other"), "Other"),
            post(params.clone(), "Second"),
        ];
        assert!(find_post(&posts, &params).is_none());
        assert!(find_post(&posts, &Params::new("2024", "03", "05", "other")).is_some());
    }

    #[test]
    fn test_find_post_is_repeatable() {
        let posts = vec![post(Params::new("2024", "03", "05", "a"), "A")];
        let params = Params::new("2024", "03", "05", "a");
        assert_eq!(find_post(&posts, &params), find_post(&posts, &params));
    }

    #[test]
    fn test_params_date_and_path() {
        let params = Params::new("2024", "03", "05", "my-post");
        assert_eq!(params.date(), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(params.path(), "2024/03/05/my-post/");
        assert_eq!(Params::new("2024", "02", "31", "x").date(), None);
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let mut untitled = post(Params::new("2024", "03", "05", "untitled"), "");
        untitled.metadata.title = None;
        assert_eq!(untitled.display_title(), "untitled");
    }

    #[test]
    fn test_path_is_not_serialized() {
        let value = serde_json::to_value(post(Params::new("2024", "03", "05", "a"), "A")).unwrap();
        assert!(value.get("path").is_none());
        assert_eq!(value["params"]["slug"], "a");
        assert_eq!(value["metadata"]["title"], "A");
    }
}
