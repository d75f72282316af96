//! Content document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::frontmatter::{BlogFrontMatter, CaseFrontMatter, ServiceFrontMatter};

/// Practice area: legal services or IT services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Legal,
    Tech,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 2] = [ServiceCategory::Legal, ServiceCategory::Tech];

    /// Path segment and wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Legal => "legal",
            ServiceCategory::Tech => "tech",
        }
    }

    /// Display label used in relayed messages
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Legal => "Legal",
            ServiceCategory::Tech => "Tech",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legal" => Ok(ServiceCategory::Legal),
            "tech" => Ok(ServiceCategory::Tech),
            other => Err(format!("unknown service category: {other}")),
        }
    }
}

/// A markdown file parsed into front-matter and rendered HTML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<F> {
    /// File stem; unique within its category
    pub slug: String,

    /// Typed front-matter
    pub frontmatter: F,

    /// Raw markdown body
    pub content: String,

    /// Rendered HTML body
    pub html: String,

    /// Parsed publication date, for categories that carry one
    pub date: Option<DateTime<Utc>>,

    /// Parsed last-updated date
    pub updated: Option<DateTime<Utc>>,

    /// File modification time
    pub modified: Option<DateTime<Utc>>,
}

impl<F> Document<F> {
    /// Best known last-modified timestamp
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated.or(self.date).or(self.modified)
    }
}

pub type BlogPost = Document<BlogFrontMatter>;
pub type Service = Document<ServiceFrontMatter>;
pub type CaseStudy = Document<CaseFrontMatter>;

/// Identifies a service page without loading it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRef {
    pub category: ServiceCategory,
    pub slug: String,
}

/// One row of `prices.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    pub id: String,
    pub practice: ServiceCategory,
    /// Thematic group shown to visitors, e.g. "Арбитраж"
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Rubles
    pub price: f64,
    /// Price is a lower bound ("от")
    #[serde(default)]
    pub price_from: bool,
    pub unit: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Service {
    /// Directory category, falling back to legal for hand-built values
    pub fn category(&self) -> ServiceCategory {
        self.frontmatter.category.unwrap_or(ServiceCategory::Legal)
    }
}
