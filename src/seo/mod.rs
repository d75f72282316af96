//! Sitemap, robots, feed, JSON-LD and breadcrumb generation

mod breadcrumbs;
mod feed;
mod robots;
mod schema;
mod sitemap;

pub use breadcrumbs::{breadcrumb_items, BreadcrumbItem};
pub use feed::{build_feed, render_feed};
pub use robots::{render_robots_txt, robots, Robots, RobotsRule};
pub use schema::{local_business_schema, offer_catalog_schema, organization_schema, SchemaKind};
pub use sitemap::{
    build_sitemap, collect_entries, render_sitemap_xml, ChangeFrequency, SitemapEntry,
    STATIC_ROUTES,
};
