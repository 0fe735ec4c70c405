//! Built-in page templates using maud
//!
//! Post HTML comes out of the markdown pipeline already rendered and is
//! embedded without escaping. Everything else (titles, categories, dates) is
//! escaped by maud.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::SiteConfig;
use crate::content::{Post, Site};

/// Stylesheet emitted next to the generated pages
pub const STYLESHEET_PATH: &str = "highlight.css";

/// URL path of a category listing, e.g. `categories/til/`
pub fn category_path(slug: &str) -> String {
    format!("categories/{}/", slug)
}

fn category_link(config: &SiteConfig, site: &Site, category: &str) -> Markup {
    match site.category_slug(category) {
        Some(slug) => html! { a href=(config.url_for(&category_path(slug))) { (category) } },
        None => html! { (category) },
    }
}

fn layout(config: &SiteConfig, title: &str, content: Markup) -> String {
    let page_title = if title.is_empty() {
        config.title.clone()
    } else {
        format!("{} | {}", title, config.title)
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if !config.author.is_empty() {
                    meta name="author" content=(config.author);
                }
                title { (page_title) }
                link rel="stylesheet" href=(config.url_for(STYLESHEET_PATH));
            }
            body {
                header {
                    a.site-title href=(config.url_for("")) { (config.title) }
                }
                main { (content) }
            }
        }
    }
    .into_string()
}

fn post_list(config: &SiteConfig, posts: &[&Post]) -> Markup {
    html! {
        ul.post-list {
            @for post in posts {
                li {
                    time { (post.params.year) "-" (post.params.month) "-" (post.params.day) }
                    " "
                    a href=(config.url_for(&post.params.path())) { (post.display_title()) }
                }
            }
        }
    }
}

/// A single post page
pub fn post_page(config: &SiteConfig, site: &Site, post: &Post) -> String {
    let content = html! {
        article {
            h1.post-title { (post.display_title()) }
            p.post-meta {
                @if let Some(published) = &post.metadata.date_published {
                    time { (published) }
                }
                @if let Some(category) = &post.metadata.category {
                    " in "
                    (category_link(config, site, category))
                }
            }
            div.post-content { (PreEscaped(post.html.as_str())) }
        }
    };
    layout(config, post.display_title(), content)
}

/// Home page: every post plus the category navigation
pub fn index_page(config: &SiteConfig, site: &Site) -> String {
    let posts = site.posts_newest_first();
    let content = html! {
        @if !site.categories().is_empty() {
            nav.categories {
                @for category in site.categories() {
                    (category_link(config, site, category))
                    " "
                }
            }
        }
        (post_list(config, &posts))
    };
    layout(config, "", content)
}

/// Listing of the posts filed under one category
pub fn category_page(config: &SiteConfig, category: &str, posts: &[&Post]) -> String {
    let content = html! {
        h1 { "Category: " (category) }
        (post_list(config, posts))
    };
    layout(config, category, content)
}

/// Shown when a lookup finds no post, or more than one
pub fn not_found_page(config: &SiteConfig) -> String {
    let content = html! {
        h1 { "Post not found" }
        p { a href=(config.url_for("")) { "Back to all posts" } }
    };
    layout(config, "Not found", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Metadata, Params};
    use std::path::PathBuf;

    fn sample_post() -> Post {
        Post {
            path: PathBuf::from("/posts/2024-03-05/my-post.md"),
            metadata: Metadata {
                title: Some("Fish & <Chips>".to_string()),
                category: Some("Food Notes".to_string()),
                date_created: None,
                date_published: Some("2024-03-05".to_string()),
            },
            markdown: "# Hello\n".to_string(),
            html: "<h1>Hello</h1>\n".to_string(),
            params: Params::new("2024", "03", "05", "my-post"),
        }
    }

    fn post_in(slug: &str, category: &str) -> Post {
        Post {
            metadata: Metadata {
                title: Some(slug.to_string()),
                category: Some(category.to_string()),
                ..Default::default()
            },
            params: Params::new("2024", "03", "05", slug),
            ..sample_post()
        }
    }

    #[test]
    fn test_post_page_embeds_html_verbatim() {
        let post = sample_post();
        let site = Site::from_posts(vec![post.clone()]);
        let page = post_page(&SiteConfig::default(), &site, &post);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h1>Hello</h1>"));
        assert!(page.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(page.contains(r#"href="/categories/food-notes/""#));
        assert!(page.contains(r#"href="/highlight.css""#));
    }

    #[test]
    fn test_index_page_links_posts_and_categories() {
        let config = SiteConfig::default();
        let site = Site::from_posts(vec![sample_post()]);
        let page = index_page(&config, &site);
        assert!(page.contains(r#"href="/2024/03/05/my-post/""#));
        assert!(page.contains("2024-03-05"));
        assert!(page.contains(r#"href="/categories/food-notes/">Food Notes</a>"#));
    }

    #[test]
    fn test_colliding_categories_link_to_distinct_pages() {
        let config = SiteConfig::default();
        let first = post_in("a", "Dev Notes");
        let second = post_in("b", "dev-notes");
        let site = Site::from_posts(vec![first, second.clone()]);

        let page = index_page(&config, &site);
        assert!(page.contains(r#"href="/categories/dev-notes/">Dev Notes</a>"#));
        assert!(page.contains(r#"href="/categories/dev-notes-2/">dev-notes</a>"#));

        let page = post_page(&config, &site, &second);
        assert!(page.contains(r#"href="/categories/dev-notes-2/""#));
    }

    #[test]
    fn test_category_path() {
        assert_eq!(category_path("rust-tips"), "categories/rust-tips/");
    }

    #[test]
    fn test_not_found_page() {
        let page = not_found_page(&SiteConfig::default());
        assert!(page.contains("Post not found"));
    }
}
