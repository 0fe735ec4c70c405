//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Index the posts and write the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let site = blog.load_site()?;
    tracing::info!(
        "Loaded {} posts in {} categories",
        site.posts().len(),
        site.categories().len()
    );

    let written = Generator::new(blog).generate(&site)?;

    let duration = start.elapsed();
    tracing::info!("Generated {} pages in {:.2}s", written, duration.as_secs_f64());

    Ok(())
}
