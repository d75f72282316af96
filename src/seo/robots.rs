//! robots.txt rules

use serde::Serialize;

use crate::helpers::full_url_for;

const INTERNAL_PATHS: &[&str] = &["/api/", "/_next/", "/admin/"];

/// Rules for one user agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

impl RobotsRule {
    fn new(user_agent: &str, extra_disallow: &[&str]) -> Self {
        RobotsRule {
            user_agent: user_agent.to_string(),
            allow: vec!["/".to_string()],
            disallow: INTERNAL_PATHS
                .iter()
                .chain(extra_disallow)
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Robots {
    pub rules: Vec<RobotsRule>,
    pub sitemap: String,
    pub host: String,
}

/// The fixed crawler policy for the site
pub fn robots(base_url: &str) -> Robots {
    Robots {
        rules: vec![
            RobotsRule::new("*", &["/*.json"]),
            RobotsRule::new("Googlebot", &[]),
            RobotsRule::new("Yandex", &[]),
        ],
        sitemap: full_url_for(base_url, "/sitemap.xml"),
        host: full_url_for(base_url, ""),
    }
}

/// Render as a plain-text robots.txt
pub fn render_robots_txt(robots: &Robots) -> String {
    let mut out = String::new();

    for rule in &robots.rules {
        out.push_str(&format!("User-Agent: {}\n", rule.user_agent));
        for path in &rule.allow {
            out.push_str(&format!("Allow: {}\n", path));
        }
        for path in &rule.disallow {
            out.push_str(&format!("Disallow: {}\n", path));
        }
        out.push('\n');
    }

    out.push_str(&format!("Host: {}\n", robots.host));
    out.push_str(&format!("Sitemap: {}\n", robots.sitemap));
    out
}
