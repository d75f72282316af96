//! List site content

use anyhow::Result;

use crate::content::ServiceCategory;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.store();

    match content_type {
        "blog" | "post" | "posts" => {
            let posts = store.all_blog_posts()?;
            println!("Blog posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!("  {} - {} [{}]", date, post.frontmatter.title, post.slug);
            }
        }
        "services" | "service" => {
            for category in ServiceCategory::ALL {
                let services = store.services_by_order(category)?;
                println!("Services / {} ({}):", category, services.len());
                for service in services {
                    println!("  {} [{}]", service.frontmatter.title, service.slug);
                }
            }
        }
        "cases" | "case" => {
            let cases = store.all_cases()?;
            println!("Cases ({}):", cases.len());
            for case in cases {
                let service = case
                    .frontmatter
                    .service_type
                    .map(|s| s.as_str())
                    .unwrap_or("-");
                println!("  {} - {} [{}]", service, case.frontmatter.title, case.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: blog, services, cases",
                content_type
            );
        }
    }

    Ok(())
}
