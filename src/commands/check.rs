//! Validate every content document

use anyhow::{Context, Result};

use crate::Site;

/// Parse every blog post, service page, case study and the price list
pub fn run(site: &Site) -> Result<()> {
    let store = site.store();

    let posts = store.all_blog_posts().context("blog posts")?;
    let services = store.all_services().context("service pages")?;
    let cases = store.all_cases().context("case studies")?;
    let prices = store.price_list().context("price list")?;

    println!(
        "OK: {} blog posts, {} service pages, {} case studies, {} prices",
        posts.len(),
        services.len(),
        cases.len(),
        prices.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> Site {
        Site::with_config(dir.path().to_path_buf(), SiteConfig::default())
    }

    #[test]
    fn test_check_empty_site() {
        let dir = TempDir::new().unwrap();
        assert!(run(&site(&dir)).is_ok());
    }

    #[test]
    fn test_check_reports_bad_date() {
        let dir = TempDir::new().unwrap();
        let blog = dir.path().join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("bad.md"), "---\ntitle: Bad\ndate: someday\n---\n").unwrap();

        let err = run(&site(&dir)).unwrap_err();
        assert!(format!("{:#}", err).contains("blog posts"));
    }

    #[test]
    fn test_check_reports_bad_price_list() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(dir.path().join("content/prices.json"), "[{\"id\": 1}]").unwrap();

        let err = run(&site(&dir)).unwrap_err();
        assert!(format!("{:#}", err).contains("price list"));
    }
}
