//! Breadcrumb trails for pages outside the nested service routes

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::BreadcrumbConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    /// Absent on the current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Parent crumb (if any) followed by the page itself; unknown paths get none.
///
/// A trailing slash is ignored, so `/ecp/` finds the `/ecp` entry.
pub fn breadcrumb_items(
    table: &IndexMap<String, BreadcrumbConfig>,
    path: &str,
) -> Vec<BreadcrumbItem> {
    let trimmed = path.trim_end_matches('/');
    let key = if trimmed.is_empty() { "/" } else { trimmed };

    let Some(crumb) = table.get(key) else {
        return Vec::new();
    };

    let mut items = Vec::with_capacity(2);
    if let Some(parent) = &crumb.parent {
        items.push(BreadcrumbItem {
            label: parent.label.clone(),
            href: Some(parent.href.clone()),
        });
    }
    items.push(BreadcrumbItem {
        label: crumb.label.clone(),
        href: None,
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeoConfig;

    #[test]
    fn test_page_with_parent() {
        let table = SeoConfig::default().breadcrumbs;
        let items = breadcrumb_items(&table, "/ecp");
        assert_eq!(
            items,
            vec![
                BreadcrumbItem {
                    label: "Юридические услуги".to_string(),
                    href: Some("/services/legal".to_string()),
                },
                BreadcrumbItem {
                    label: "ЭЦП и Рутокены".to_string(),
                    href: None,
                },
            ]
        );
        assert_eq!(breadcrumb_items(&table, "/ecp/"), items);
    }

    #[test]
    fn test_top_level_page() {
        let table = SeoConfig::default().breadcrumbs;
        let items = breadcrumb_items(&table, "/price");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "Цены");
        assert_eq!(items[0].href, None);
    }

    #[test]
    fn test_unknown_path_is_empty() {
        let table = SeoConfig::default().breadcrumbs;
        assert!(breadcrumb_items(&table, "/services/legal/arbitrazh").is_empty());
        assert!(breadcrumb_items(&table, "/").is_empty());
        assert!(breadcrumb_items(&table, "").is_empty());
    }

    #[test]
    fn test_current_page_has_no_href_in_json() {
        let table = SeoConfig::default().breadcrumbs;
        let json = serde_json::to_value(breadcrumb_items(&table, "/web")).unwrap();
        assert_eq!(json[0]["href"], "/services/tech");
        assert!(json[1].get("href").is_none());
    }
}
