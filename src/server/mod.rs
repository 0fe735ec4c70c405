//! Preview server backed by the in-memory snapshot
//!
//! Posts are indexed once at startup. Requests only read the shared
//! `Arc<ServerState>`, so no locking is involved; editing a post requires a
//! restart.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{Params, Site};
use crate::templates;
use crate::Blog;

/// Server state
pub struct ServerState {
    config: SiteConfig,
    site: Site,
    stylesheet: String,
}

impl ServerState {
    pub fn new(blog: &Blog, site: Site) -> Result<Self> {
        let stylesheet = blog.renderer().stylesheet()?;
        Ok(Self {
            config: blog.config.clone(),
            site,
            stylesheet,
        })
    }
}

/// Routes for the index, posts, categories and the highlight stylesheet
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/highlight.css", get(stylesheet_handler))
        .route("/categories/:category", get(category_handler))
        .route("/categories/:category/", get(category_handler))
        .route("/:year/:month/:day/:slug", get(post_handler))
        .route("/:year/:month/:day/:slug/", get(post_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let site = blog.load_site()?;
    tracing::info!(
        "Serving {} posts in {} categories",
        site.posts().len(),
        site.categories().len()
    );
    let state = Arc::new(ServerState::new(blog, site)?);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(templates::index_page(&state.config, &state.site))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(params): Path<Params>,
) -> Response {
    match state.site.post_by_params(&params) {
        Some(post) => {
            Html(templates::post_page(&state.config, &state.site, post)).into_response()
        }
        None => {
            tracing::debug!("No unique post for {}", params.path());
            not_found(&state)
        }
    }
}

async fn category_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let found = state.site.category_by_slug(&slug);

    match found {
        Some(name) => {
            let posts: Vec<_> = state.site.posts_in_category(name).collect();
            Html(templates::category_page(&state.config, name, &posts)).into_response()
        }
        None => not_found(&state),
    }
}

async fn stylesheet_handler(State(state): State<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.stylesheet.clone(),
    )
        .into_response()
}

async fn fallback_handler(State(state): State<Arc<ServerState>>) -> Response {
    not_found(&state)
}

fn not_found(state: &ServerState) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(templates::not_found_page(&state.config)),
    )
        .into_response()
}
