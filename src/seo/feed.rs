//! RSS 2.0 feed of the newest blog posts

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::{BlogPost, ContentError, ContentStore};
use crate::helpers::{absolutize_urls, cdata, escape_xml, full_url_for, strip_invalid_xml_chars};

/// Load blog posts and render the feed
pub fn build_feed(
    config: &SiteConfig,
    store: &ContentStore,
    now: DateTime<Utc>,
) -> Result<String, ContentError> {
    let posts = store.all_blog_posts()?;
    Ok(render_feed(config, &posts, now))
}

/// Render already-sorted posts, keeping at most `feed.limit` items
pub fn render_feed(config: &SiteConfig, posts: &[BlogPost], now: DateTime<Utc>) -> String {
    let base_url = config.base_url();

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(
        r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/">"#,
    );
    feed.push_str("\n  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!(
        "    <link>{}</link>\n",
        escape_xml(&full_url_for(base_url, "/blog"))
    ));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!("    <language>{}</language>\n", escape_xml(&config.language)));
    feed.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        now.to_rfc2822()
    ));
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(&full_url_for(base_url, "/rss.xml"))
    ));

    for post in posts.iter().take(config.feed.limit) {
        let link = escape_xml(&full_url_for(base_url, &format!("/blog/{}", post.slug)));
        let fm = &post.frontmatter;

        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&fm.title)));
        feed.push_str(&format!("      <link>{}</link>\n", link));
        feed.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", link));
        if let Some(date) = post.date {
            feed.push_str(&format!("      <pubDate>{}</pubDate>\n", date.to_rfc2822()));
        }
        if !fm.category.is_empty() {
            feed.push_str(&format!(
                "      <category>{}</category>\n",
                escape_xml(&fm.category)
            ));
        }

        let summary = if fm.excerpt.is_empty() {
            &fm.description
        } else {
            &fm.excerpt
        };
        if !summary.is_empty() {
            feed.push_str(&format!(
                "      <description>{}</description>\n",
                escape_xml(&strip_invalid_xml_chars(summary))
            ));
        }

        let html = strip_invalid_xml_chars(&absolutize_urls(&post.html, base_url));
        feed.push_str(&format!(
            "      <content:encoded>{}</content:encoded>\n",
            cdata(&html)
        ));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n</rss>\n");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownRenderer;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, slug: &str, body: &str) {
        let blog = dir.path().join("blog");
        std::fs::create_dir_all(&blog).unwrap();
        std::fs::write(blog.join(format!("{slug}.md")), body).unwrap();
    }

    fn store(dir: &TempDir) -> ContentStore {
        ContentStore::new(dir.path(), Arc::new(MarkdownRenderer::new()))
    }

    #[test]
    fn test_feed_items() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "edo-guide",
            "---\ntitle: \"EDO & you\"\ndate: 2024-06-01\ncategory: Legal\nexcerpt: Short\n---\n[Link](/ecp) ok",
        );

        let now = Utc::now();
        let feed = build_feed(&SiteConfig::default(), &store(&dir), now).unwrap();

        assert!(feed.starts_with("<?xml"));
        assert!(feed.contains("<title>EDO &amp; you</title>"));
        assert!(feed.contains("<link>https://uralliance.ru/blog/edo-guide</link>"));
        assert!(feed.contains("Jun 2024 00:00:00 +0000</pubDate>"));
        assert!(feed.contains("<category>Legal</category>"));
        assert!(feed.contains("<description>Short</description>"));
        assert!(feed.contains(r#"href="https://uralliance.ru/ecp""#));
        assert!(feed.contains("<content:encoded><![CDATA["));
    }

    #[test]
    fn test_feed_respects_limit() {
        let dir = TempDir::new().unwrap();
        for day in 1..=3 {
            write_post(
                &dir,
                &format!("post-{day}"),
                &format!("---\ntitle: Post {day}\ndate: 2024-06-0{day}\n---\nBody"),
            );
        }

        let mut config = SiteConfig::default();
        config.feed.limit = 2;
        let feed = build_feed(&config, &store(&dir), Utc::now()).unwrap();

        assert_eq!(feed.matches("<item>").count(), 2);
        assert!(feed.contains("post-3"));
        assert!(!feed.contains("post-1<"));
    }

    #[test]
    fn test_empty_feed() {
        let dir = TempDir::new().unwrap();
        let feed = build_feed(&SiteConfig::default(), &store(&dir), Utc::now()).unwrap();
        assert!(feed.contains("<channel>"));
        assert!(!feed.contains("<item>"));
    }
}
