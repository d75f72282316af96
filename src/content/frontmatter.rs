//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{ContentError, ServiceCategory};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A typed front-matter block for one content category
pub trait FrontMatterSchema: DeserializeOwned {
    /// Content kind used in errors and logs
    const KIND: &'static str;

    /// Raw publication date, if the schema has one
    fn date(&self) -> Option<&str> {
        None
    }

    /// Raw last-updated date, if the schema has one
    fn updated(&self) -> Option<&str> {
        None
    }
}

/// Front-matter of a blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFrontMatter {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub image: String,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub related_posts: Vec<String>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub updated_date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatterSchema for BlogFrontMatter {
    const KIND: &'static str = "Blog post";

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn updated(&self) -> Option<&str> {
        self.updated_date.as_deref()
    }
}

/// SEO block of a service page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSeo {
    pub keywords: String,
    pub og_image: String,
}

/// Front-matter of a service page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFrontMatter {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Set from the directory the file lives in
    #[serde(default)]
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub seo: ServiceSeo,
    #[serde(default)]
    pub featured: bool,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatterSchema for ServiceFrontMatter {
    const KIND: &'static str = "Service";
}

/// Front-matter of a case study
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFrontMatter {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub service_type: Option<ServiceCategory>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub result_metrics: String,
    #[serde(default)]
    pub image: String,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub technologies: Vec<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatterSchema for CaseFrontMatter {
    const KIND: &'static str = "Case study";

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

/// Parse front-matter from content string.
/// Returns (front_matter, remaining_content).
///
/// A file without a `---` block is parsed as an empty mapping, so schemas
/// with required keys reject it.
pub fn parse<'a, F: FrontMatterSchema>(
    content: &'a str,
    path: &Path,
) -> Result<(F, &'a str), ContentError> {
    let (yaml, body) = split(content).ok_or_else(|| ContentError::UnterminatedFrontMatter {
        path: path.to_path_buf(),
    })?;

    let is_blank = yaml
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'));
    let yaml = if is_blank { "{}" } else { yaml };

    let fm = serde_yaml::from_str::<F>(yaml).map_err(|source| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((fm, body))
}

/// Split a document into its YAML block and body.
///
/// Returns `None` when an opening `---` has no closing delimiter.
fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let first_line_end = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    if content[..first_line_end].trim_end() != "---" {
        return Some(("", content));
    }

    let rest = &content[first_line_end..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Parse a date string in various formats.
///
/// Offsets are honoured; naive timestamps are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}
