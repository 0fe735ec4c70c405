//! Print the rendered HTML of a single post

use anyhow::Result;

use crate::content::{Params, Site};
use crate::Blog;

pub fn run(blog: &Blog, params: &Params) -> Result<()> {
    let site = blog.load_site()?;
    print!("{}", post_html(&site, params)?);
    Ok(())
}

/// Rendered HTML for `params`; a missing or ambiguous post is an error here
pub fn post_html<'a>(site: &'a Site, params: &Params) -> Result<&'a str> {
    match site.post_by_params(params) {
        Some(post) => Ok(&post.html),
        None => anyhow::bail!("Post not found: {}", params.path()),
    }
}
