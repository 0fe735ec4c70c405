//! Front-matter parsing

use serde::{Deserialize, Serialize};

use super::error::FrontMatterError;

const DELIMITER: &str = "---";

/// Post metadata read from the YAML front-matter block.
///
/// Nothing is defaulted: a key missing from the file stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date_created: Option<String>,
    pub date_published: Option<String>,
}

/// Splits a post source into its front-matter and body
pub struct FrontMatter;

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (metadata, remaining_content)
    pub fn parse(content: &str) -> Result<(Metadata, &str), FrontMatterError> {
        match Self::split(content)? {
            Some((yaml, body)) => {
                if yaml.trim().is_empty() {
                    return Ok((Metadata::default(), body));
                }
                let metadata = serde_yaml::from_str::<Metadata>(yaml)?;
                Ok((metadata, body))
            }
            None => Ok((Metadata::default(), content)),
        }
    }

    /// Locate the `---` fenced block at the top of `content`.
    ///
    /// Returns `None` when the first line is not a delimiter. The body starts
    /// right after the closing delimiter's line ending.
    pub fn split(content: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let Some(rest) = strip_delimiter_line(content) else {
            return Ok(None);
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if is_delimiter(line) {
                return Ok(Some((&rest[..offset], &rest[offset + line.len()..])));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

fn strip_delimiter_line(content: &str) -> Option<&str> {
    let first = content.split_inclusive('\n').next()?;
    is_delimiter(first).then(|| &content[first.len()..])
}
