//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Join a site-relative path onto the base URL
///
/// # Examples
/// ```ignore
/// full_url_for("https://uralliance.ru/", "/blog/post") // -> "https://uralliance.ru/blog/post"
/// full_url_for("https://uralliance.ru", "")           // -> "https://uralliance.ru"
/// ```
pub fn full_url_for(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode a query-string component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Convert site-relative URLs in HTML content to absolute URLs
/// Handles href="/...", src="/...", and similar patterns
pub fn absolutize_urls(content: &str, base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for("https://uralliance.ru/", "/blog/post"),
            "https://uralliance.ru/blog/post"
        );
        assert_eq!(full_url_for("https://uralliance.ru", ""), "https://uralliance.ru");
        assert_eq!(
            full_url_for("https://uralliance.ru", "ecp"),
            "https://uralliance.ru/ecp"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Привет!"), "%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82!");
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
    }

    #[test]
    fn test_absolutize_urls() {
        let html = r#"<a href="/ecp">x</a><img src="/img.png"><a href="https://other">y</a>"#;
        let out = absolutize_urls(html, "https://uralliance.ru/");
        assert!(out.contains(r#"href="https://uralliance.ru/ecp""#));
        assert!(out.contains(r#"src="https://uralliance.ru/img.png""#));
        assert!(out.contains(r#"href="https://other""#));
    }
}
