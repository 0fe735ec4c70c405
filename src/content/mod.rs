//! Content module - handles posts, front-matter and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod site;

pub use error::{ContentError, FrontMatterError, RenderError};
pub use frontmatter::{FrontMatter, Metadata};
pub use loader::{collect_categories, index_posts};
pub use markdown::{Highlight, MarkdownRenderer, Prettify, Transform};
pub use post::{find_post, Params, Post};
pub use site::Site;
