//! List site content

use anyhow::Result;

use crate::content::Site;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, json: bool) -> Result<()> {
    let site = blog.load_site()?;
    print!("{}", render(&site, content_type, json)?);
    Ok(())
}

/// Format the listing for `content_type` as text or JSON
pub fn render(site: &Site, content_type: &str, json: bool) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            if json {
                out = serde_json::to_string_pretty(site.posts())?;
                out.push('\n');
            } else {
                out.push_str(&format!("Posts ({}):\n", site.posts().len()));
                for post in site.posts() {
                    let category = post.metadata.category.as_deref().unwrap_or("-");
                    out.push_str(&format!(
                        "  {}-{}-{} - {} [{}]\n",
                        post.params.year,
                        post.params.month,
                        post.params.day,
                        post.display_title(),
                        category
                    ));
                }
            }
        }
        "category" | "categories" => {
            if json {
                out = serde_json::to_string_pretty(site.categories())?;
                out.push('\n');
            } else {
                out.push_str(&format!("Categories ({}):\n", site.categories().len()));
                for category in site.categories() {
                    let count = site.posts_in_category(category).count();
                    out.push_str(&format!("  {} ({})\n", category, count));
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(out)
}
