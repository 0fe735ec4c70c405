//! Error types for indexing and rendering content

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while indexing the content directory.
///
/// Every variant is fatal: a single bad bundle or post aborts the whole
/// index so that a build never ships a silently incomplete blog.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("unexpected entry {path:?}: bundles hold only post files and the content root holds only bundles")]
    UnexpectedEntry { path: PathBuf },

    #[error("malformed bundle name {name:?} at {path:?}: expected YYYY-MM-DD")]
    MalformedBundle { path: PathBuf, name: String },

    #[error("file name is not valid UTF-8: {path:?}")]
    InvalidFileName { path: PathBuf },

    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("failed to render {path:?}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

/// Front-matter split and decode errors
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing closing `---` delimiter")]
    Unterminated,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Markdown pipeline errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to highlight `{lang}` code block: {message}")]
    Highlight { lang: String, message: String },

    #[error("theme error: {0}")]
    Theme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_bundle_message() {
        let err = ContentError::MalformedBundle {
            path: PathBuf::from("posts/2024-03"),
            name: "2024-03".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("2024-03"));
        assert!(message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_front_matter_error_keeps_source() {
        use std::error::Error as _;

        let err = ContentError::FrontMatter {
            path: PathBuf::from("posts/2024-03-05/a.md"),
            source: FrontMatterError::Unterminated,
        };
        assert!(err.to_string().contains("a.md"));
        assert!(err.source().is_some());
    }
}
