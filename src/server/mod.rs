//! HTTP server: content API, SEO documents and the contact endpoint

mod contact;
mod content;
mod error;
mod seo;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::{ApiError, ApiResponse};

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::relay::{MessageRelay, TelegramRelay};
use crate::Site;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub store: Arc<ContentStore>,
    pub relay: Arc<dyn MessageRelay>,
}

impl AppState {
    pub fn new(site: &Site) -> Self {
        AppState {
            config: Arc::new(site.config.clone()),
            store: Arc::new(site.store()),
            relay: Arc::new(TelegramRelay::new(&site.config.telegram)),
        }
    }
}

/// All routes; anything unmatched is served from `public_dir`
pub fn router(state: AppState, public_dir: impl AsRef<std::path::Path>) -> Router {
    Router::new()
        .route("/api/contact", post(contact::submit))
        .route("/api/blog", get(content::blog_index))
        .route("/api/blog/:slug", get(content::blog_post))
        .route("/api/cases", get(content::case_index))
        .route("/api/cases/:slug", get(content::case_study))
        .route("/api/services/:category", get(content::service_index))
        .route("/api/services/:category/:slug", get(content::service_page))
        .route("/api/messenger-links", get(content::messenger))
        .route("/api/schema/:kind", get(seo::schema))
        .route("/api/breadcrumbs", get(seo::breadcrumbs))
        .route("/sitemap.json", get(seo::sitemap_json))
        .route("/sitemap.xml", get(seo::sitemap_xml))
        .route("/robots.txt", get(seo::robots_txt))
        .route("/rss.xml", get(seo::rss_xml))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = AppState::new(site);
    if !site.config.telegram.is_configured() {
        tracing::warn!("Telegram credentials missing; contact submissions will fail");
    }

    let app = router(state, &site.public_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
