//! uralliance-site: content pipeline and API server for the Uralliance website
//!
//! Markdown content (blog posts, service pages, case studies) is parsed on
//! demand and served as JSON, alongside generated sitemap, robots and RSS
//! documents and a contact form that relays submissions to Telegram.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod helpers;
pub mod relay;
pub mod seo;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A site rooted at a base directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content root
    pub content_dir: PathBuf,
    /// Static files and generated artifacts
    pub public_dir: PathBuf,
}

impl Site {
    /// Load `_config.yml` (when present) and environment overrides
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();
        config.validate()?;

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already-loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Content store over `content_dir` with the configured highlighter
    pub fn store(&self) -> content::ContentStore {
        let renderer = content::MarkdownRenderer::with_theme(&self.config.highlight.theme);
        content::ContentStore::new(&self.content_dir, Arc::new(renderer))
            .with_blog_highlighting(self.config.highlight.enable)
    }

    /// Write sitemap, robots and feed into the public directory
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Parse every document, failing on the first bad one
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }
}
