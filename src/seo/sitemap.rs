//! Sitemap aggregation
//!
//! Entries come from a hand-maintained route list plus one entry per blog
//! post, service page and case study currently on disk.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

use crate::config::SiteConfig;
use crate::content::{BlogPost, CaseStudy, ContentError, ContentStore, Service};
use crate::helpers::{escape_xml, full_url_for};

/// Top-level routes that exist regardless of content
pub const STATIC_ROUTES: &[&str] = &[
    "",
    "/services/legal",
    "/services/tech",
    "/price",
    "/about",
    "/contacts",
    "/blog",
    "/cases",
    "/corporate",
    "/ecp",
    "/edo",
    "/fedresurs",
    "/liquidation",
    "/max",
    "/privacy",
    "/terms",
];

const BLOG_PRIORITY: f64 = 0.6;
const CASE_PRIORITY: f64 = 0.6;
const SERVICE_PRIORITY: f64 = 0.7;
const VANITY_PRIORITY: f64 = 0.8;

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// One `<url>` of the sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

/// Read the content store and build the full sitemap
pub fn build_sitemap(
    config: &SiteConfig,
    store: &ContentStore,
    now: DateTime<Utc>,
) -> Result<Vec<SitemapEntry>, ContentError> {
    let posts = store.all_blog_posts()?;
    let services = store.all_services()?;
    let cases = store.all_cases()?;

    Ok(collect_entries(
        config.base_url(),
        &config.seo.vanity_urls,
        &posts,
        &services,
        &cases,
        now,
    ))
}

/// Merge static routes and content into sitemap entries; duplicate URLs keep
/// their first occurrence
pub fn collect_entries(
    base_url: &str,
    vanity_urls: &IndexMap<String, String>,
    posts: &[BlogPost],
    services: &[Service],
    cases: &[CaseStudy],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mut entries = Vec::new();

    for route in STATIC_ROUTES {
        entries.push(SitemapEntry {
            url: full_url_for(base_url, route),
            last_modified: now,
            change_frequency: ChangeFrequency::Weekly,
            priority: if route.is_empty() { 1.0 } else { 0.8 },
        });
    }

    for post in posts {
        entries.push(SitemapEntry {
            url: full_url_for(base_url, &format!("/blog/{}", post.slug)),
            last_modified: post.date.unwrap_or(now),
            change_frequency: ChangeFrequency::Monthly,
            priority: BLOG_PRIORITY,
        });
    }

    for service in services {
        let (path, priority) = service_path(service, vanity_urls);
        entries.push(SitemapEntry {
            url: full_url_for(base_url, &path),
            last_modified: service.last_modified().unwrap_or(now),
            change_frequency: ChangeFrequency::Monthly,
            priority,
        });
    }

    for case in cases {
        entries.push(SitemapEntry {
            url: full_url_for(base_url, &format!("/cases/{}", case.slug)),
            last_modified: case.last_modified().unwrap_or(now),
            change_frequency: ChangeFrequency::Monthly,
            priority: CASE_PRIORITY,
        });
    }

    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.url.clone()));
    entries
}

/// Vanity path with raised priority, or the canonical nested path.
///
/// A `category/slug` key is tried before the bare slug.
fn service_path(service: &Service, vanity_urls: &IndexMap<String, String>) -> (String, f64) {
    let qualified = format!("{}/{}", service.category(), service.slug);
    match vanity_urls
        .get(&qualified)
        .or_else(|| vanity_urls.get(&service.slug))
    {
        Some(path) => (path.clone(), VANITY_PRIORITY),
        None => (
            format!("/services/{}/{}", service.category(), service.slug),
            SERVICE_PRIORITY,
        ),
    }
}

/// Render entries as a sitemaps.org XML document
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
