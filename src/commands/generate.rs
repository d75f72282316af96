//! Write SEO documents into the public directory

use anyhow::Result;
use chrono::Utc;
use std::fs;

use crate::seo::{build_feed, build_sitemap, render_robots_txt, render_sitemap_xml, robots};
use crate::Site;

/// Generate sitemap.xml, robots.txt and rss.xml
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();
    let store = site.store();
    let now = Utc::now();

    fs::create_dir_all(&site.public_dir)?;

    let entries = build_sitemap(&site.config, &store, now)?;
    fs::write(site.public_dir.join("sitemap.xml"), render_sitemap_xml(&entries))?;
    tracing::info!("Generated sitemap.xml ({} urls)", entries.len());

    let robots = render_robots_txt(&robots(site.config.base_url()));
    fs::write(site.public_dir.join("robots.txt"), robots)?;
    tracing::info!("Generated robots.txt");

    let feed = build_feed(&site.config, &store, now)?;
    fs::write(site.public_dir.join("rss.xml"), feed)?;
    tracing::info!("Generated rss.xml");

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
