//! CLI entry point for daybook

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daybook::content::Params;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(version)]
#[command(about = "Index dated markdown bundles and publish them as a static blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new post in today's bundle
    New {
        /// Title of the new post
        title: String,

        /// Category written to the front-matter
        #[arg(long)]
        category: Option<String>,

        /// File name (without .md), derived from the title by default
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Print the rendered HTML of one post
    Show {
        year: String,
        month: String,
        day: String,
        slug: String,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "daybook=debug,info"
    } else {
        "daybook=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    let blog = daybook::Blog::new(&base_dir)?;

    match cli.command {
        Commands::New {
            title,
            category,
            slug,
        } => {
            let path = daybook::commands::new::create_post(
                &blog,
                &title,
                category.as_deref(),
                slug.as_deref(),
            )?;
            println!("Created: {:?}", path);
        }

        Commands::Generate => {
            tracing::info!("Generating static files...");
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            daybook::server::start(&blog, &ip, port).await?;
        }

        Commands::Show {
            year,
            month,
            day,
            slug,
        } => {
            let params = Params::new(year, month, day, slug);
            daybook::commands::show::run(&blog, &params)?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type, json } => {
            daybook::commands::list::run(&blog, &r#type, json)?;
        }
    }

    Ok(())
}
