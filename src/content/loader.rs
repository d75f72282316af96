//! Content loader - reads blog posts, services and case studies from disk
//!
//! Every call goes to the filesystem; nothing is cached between calls.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::frontmatter::{self, parse_date_string, FrontMatterSchema};
use super::{
    BlogPost, CaseStudy, ContentError, Document, MarkdownRenderer, PriceItem, Service,
    ServiceCategory, ServiceRef,
};

/// Loads content from the content directory
#[derive(Clone)]
pub struct ContentStore {
    root: PathBuf,
    renderer: Arc<MarkdownRenderer>,
    highlight_blog: bool,
}

impl ContentStore {
    /// Create a new content store rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P, renderer: Arc<MarkdownRenderer>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            renderer,
            highlight_blog: true,
        }
    }

    /// Toggle syntax highlighting for blog posts
    pub fn with_blog_highlighting(mut self, enable: bool) -> Self {
        self.highlight_blog = enable;
        self
    }

    fn blog_dir(&self) -> PathBuf {
        self.root.join("blog")
    }

    fn cases_dir(&self) -> PathBuf {
        self.root.join("cases")
    }

    fn services_dir(&self, category: ServiceCategory) -> PathBuf {
        self.root.join("services").join(category.as_str())
    }

    // ------------------------------------------------------------------
    // Blog
    // ------------------------------------------------------------------

    /// Load a single blog post by slug
    pub fn blog_post(&self, slug: &str) -> Result<BlogPost, ContentError> {
        self.load_document(&self.blog_dir(), slug, self.highlight_blog)
    }

    /// Load all blog posts, newest first
    pub fn all_blog_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = list_markdown_files(&self.blog_dir())?
            .iter()
            .map(|slug| self.blog_post(slug))
            .collect::<Result<Vec<_>, _>>()?;

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Blog posts whose front-matter category matches exactly
    pub fn blog_posts_by_category(&self, category: &str) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = self.all_blog_posts()?;
        posts.retain(|post| post.frontmatter.category == category);
        Ok(posts)
    }

    /// Load the posts named by a `relatedPosts` list, in list order.
    ///
    /// Slugs that no longer exist are skipped.
    pub fn related_posts(&self, slugs: &[String]) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = Vec::new();
        for slug in slugs {
            match self.blog_post(slug) {
                Ok(post) => posts.push(post),
                Err(e) if e.is_not_found() => {
                    tracing::warn!("Skipping related post: {}", e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(posts)
    }

    // ------------------------------------------------------------------
    // Case studies
    // ------------------------------------------------------------------

    /// Load a single case study by slug
    pub fn case_study(&self, slug: &str) -> Result<CaseStudy, ContentError> {
        self.load_document(&self.cases_dir(), slug, false)
    }

    /// Load all case studies, newest first
    pub fn all_cases(&self) -> Result<Vec<CaseStudy>, ContentError> {
        let mut cases = list_markdown_files(&self.cases_dir())?
            .iter()
            .map(|slug| self.case_study(slug))
            .collect::<Result<Vec<_>, _>>()?;

        sort_newest_first(&mut cases);
        Ok(cases)
    }

    /// Case studies for one practice area
    pub fn cases_by_service_type(
        &self,
        category: ServiceCategory,
    ) -> Result<Vec<CaseStudy>, ContentError> {
        let mut cases = self.all_cases()?;
        cases.retain(|case| case.frontmatter.service_type == Some(category));
        Ok(cases)
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    /// Load a single service page
    pub fn service(&self, category: ServiceCategory, slug: &str) -> Result<Service, ContentError> {
        let mut service: Service = self.load_document(&self.services_dir(category), slug, false)?;
        service.frontmatter.category = Some(category);
        Ok(service)
    }

    /// Services of one category in directory listing order
    pub fn services(&self, category: ServiceCategory) -> Result<Vec<Service>, ContentError> {
        list_markdown_files(&self.services_dir(category))?
            .iter()
            .map(|slug| self.service(category, slug))
            .collect()
    }

    /// Services of one category by their `order` field; unordered ones last
    pub fn services_by_order(&self, category: ServiceCategory) -> Result<Vec<Service>, ContentError> {
        let mut services = self.services(category)?;
        services.sort_by_key(|service| (service.frontmatter.order.is_none(), service.frontmatter.order));
        Ok(services)
    }

    /// Every service page without parsing any of them
    pub fn all_service_refs(&self) -> Result<Vec<ServiceRef>, ContentError> {
        let mut refs = Vec::new();
        for category in ServiceCategory::ALL {
            for slug in list_markdown_files(&self.services_dir(category))? {
                refs.push(ServiceRef { category, slug });
            }
        }
        Ok(refs)
    }

    /// Every service page, legal first
    pub fn all_services(&self) -> Result<Vec<Service>, ContentError> {
        let mut services = Vec::new();
        for category in ServiceCategory::ALL {
            services.extend(self.services(category)?);
        }
        Ok(services)
    }

    // ------------------------------------------------------------------
    // Price list
    // ------------------------------------------------------------------

    /// Entries of `prices.json` in file order; a missing file is an empty list
    pub fn price_list(&self) -> Result<Vec<PriceItem>, ContentError> {
        let path = self.root.join("prices.json");
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        serde_json::from_str(&raw).map_err(|source| ContentError::PriceList { path, source })
    }

    // ------------------------------------------------------------------

    /// Read, parse and render one markdown file
    fn load_document<F: FrontMatterSchema>(
        &self,
        dir: &Path,
        slug: &str,
        highlight: bool,
    ) -> Result<Document<F>, ContentError> {
        validate_slug(slug)?;
        let path = dir.join(format!("{}.md", slug));

        let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ContentError::NotFound {
                kind: F::KIND,
                slug: slug.to_string(),
            },
            _ => ContentError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let (fm, body) = frontmatter::parse::<F>(&raw, &path)?;

        let date = parse_optional_date(fm.date(), "date", &path)?;
        let updated = parse_optional_date(fm.updated(), "updatedDate", &path)?;

        let modified = fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        let html = self.renderer.render(body, highlight);

        tracing::debug!("Loaded {} {:?}", F::KIND, path);

        Ok(Document {
            slug: slug.to_string(),
            frontmatter: fm,
            content: body.to_string(),
            html,
            date,
            updated,
            modified,
        })
    }
}

/// Slugs of all markdown files directly inside `dir`, sorted by name.
///
/// A missing directory is an empty collection.
fn list_markdown_files(dir: &Path) -> Result<Vec<String>, ContentError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut slugs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ContentError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }
    }

    Ok(slugs)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// A lookup slug must name a single file inside its category directory
fn validate_slug(slug: &str) -> Result<(), ContentError> {
    let is_valid = !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
        && !slug.contains("..");

    if is_valid {
        Ok(())
    } else {
        Err(ContentError::InvalidSlug(slug.to_string()))
    }
}

fn parse_optional_date(
    raw: Option<&str>,
    field: &'static str,
    path: &Path,
) -> Result<Option<DateTime<Utc>>, ContentError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_date_string(value)
            .map(Some)
            .ok_or_else(|| ContentError::InvalidDate {
                path: path.to_path_buf(),
                field,
                value: value.to_string(),
            }),
    }
}

/// Sort by date descending (newest first)
fn sort_newest_first<F>(docs: &mut [Document<F>]) {
    docs.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;
    use tempfile::TempDir;

    fn renderer() -> Arc<MarkdownRenderer> {
        static RENDERER: OnceLock<Arc<MarkdownRenderer>> = OnceLock::new();
        RENDERER
            .get_or_init(|| Arc::new(MarkdownRenderer::new()))
            .clone()
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn blog(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\ncategory: IT\n---\n\n## Intro\n\nBody of {}.\n", title, date, title)
    }

    fn store() -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path(), renderer());
        (dir, store)
    }

    #[test]
    fn test_blog_posts_sorted_newest_first() {
        let (dir, store) = store();
        write(dir.path(), "blog/january.md", &blog("January", "2024-01-01"));
        write(dir.path(), "blog/june.md", &blog("June", "2024-06-01"));
        write(dir.path(), "blog/december.md", &blog("December", "2023-12-01"));

        let posts = store.all_blog_posts().unwrap();
        let dates: Vec<String> = posts
            .iter()
            .map(|p| p.date.unwrap().format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-01-01", "2023-12-01"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let store = ContentStore::new("/definitely/not/here", renderer());
        assert!(store.all_blog_posts().unwrap().is_empty());
        assert!(store.all_cases().unwrap().is_empty());
        assert!(store.all_services().unwrap().is_empty());
        assert!(store.all_service_refs().unwrap().is_empty());
    }

    #[test]
    fn test_blog_post_renders_html_with_anchors() {
        let (dir, store) = store();
        write(dir.path(), "blog/hello.md", &blog("Hello", "2024-05-05"));

        let post = store.blog_post("hello").unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.frontmatter.title, "Hello");
        assert!(post.content.starts_with("## Intro"));
        assert!(post.html.contains(r#"<h2 id="intro">Intro</h2>"#));
        assert!(post.modified.is_some());
    }

    #[test]
    fn test_missing_post_is_not_found() {
        let (_dir, store) = store();
        let err = store.blog_post("nope").unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_path_traversal_slug_rejected() {
        let (_dir, store) = store();
        for slug in ["../secret", "a/b", ".hidden", ""] {
            let err = store.blog_post(slug).unwrap_err();
            assert!(matches!(err, ContentError::InvalidSlug(_)), "{slug}");
        }
    }

    #[test]
    fn test_malformed_frontmatter_fails_single_fetch_and_listing() {
        let (dir, store) = store();
        write(dir.path(), "blog/good.md", &blog("Good", "2024-01-01"));
        write(dir.path(), "blog/bad.md", "---\ntitle: [broken\n---\nBody");

        assert!(matches!(
            store.blog_post("bad").unwrap_err(),
            ContentError::FrontMatter { .. }
        ));
        assert!(store.all_blog_posts().is_err());
        assert!(store.blog_post("good").is_ok());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let (dir, store) = store();
        write(dir.path(), "blog/bad-date.md", &blog("Bad", "2024-13-45"));

        let err = store.blog_post("bad-date").unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { field: "date", .. }));
    }

    #[test]
    fn test_non_markdown_files_are_ignored() {
        let (dir, store) = store();
        write(dir.path(), "blog/post.md", &blog("Post", "2024-01-01"));
        write(dir.path(), "blog/cover.png", "binary");
        write(dir.path(), "blog/nested/inner.md", &blog("Inner", "2024-01-01"));

        let posts = store.all_blog_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "post");
    }

    #[test]
    fn test_blog_posts_by_category_and_related() {
        let (dir, store) = store();
        write(dir.path(), "blog/a.md", &blog("A", "2024-01-01"));
        write(
            dir.path(),
            "blog/b.md",
            "---\ntitle: B\ndate: 2024-02-01\ncategory: Право\nrelatedPosts: [a]\n---\nB",
        );

        let it = store.blog_posts_by_category("IT").unwrap();
        assert_eq!(it.len(), 1);
        assert_eq!(it[0].slug, "a");

        let b = store.blog_post("b").unwrap();
        let related = store.related_posts(&b.frontmatter.related_posts).unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].slug, "a");
        assert!(store.related_posts(&[]).unwrap().is_empty());

        let missing = store
            .related_posts(&["gone".to_string(), "a".to_string()])
            .unwrap();
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn test_blog_highlighting_toggle() {
        let (dir, store) = store();
        write(
            dir.path(),
            "blog/code.md",
            "---\ntitle: Code\ndate: 2024-01-01\n---\n```rust\nfn main() {}\n```\n",
        );

        let highlighted = store.blog_post("code").unwrap();
        assert!(highlighted.html.contains("highlight"));

        let plain = store.with_blog_highlighting(false).blog_post("code").unwrap();
        assert!(!plain.html.contains("highlight"));
    }

    #[test]
    fn test_services_by_category() {
        let (dir, store) = store();
        write(dir.path(), "services/legal/ecp.md", "---\ntitle: ЭЦП\norder: 2\n---\nECP");
        write(dir.path(), "services/legal/arbitrazh.md", "---\ntitle: Арбитраж\norder: 1\n---\nA");
        write(dir.path(), "services/legal/misc.md", "---\ntitle: Прочее\n---\nM");
        write(dir.path(), "services/tech/crm.md", "---\ntitle: CRM\n---\nCRM");

        let legal = store.services(ServiceCategory::Legal).unwrap();
        assert_eq!(legal.len(), 3);
        assert!(legal
            .iter()
            .all(|s| s.frontmatter.category == Some(ServiceCategory::Legal)));

        let ordered: Vec<String> = store
            .services_by_order(ServiceCategory::Legal)
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(ordered, vec!["arbitrazh", "ecp", "misc"]);

        let refs = store.all_service_refs().unwrap();
        assert_eq!(refs.len(), 4);
        assert!(refs.contains(&ServiceRef {
            category: ServiceCategory::Tech,
            slug: "crm".to_string()
        }));

        let crm = store.service(ServiceCategory::Tech, "crm").unwrap();
        assert_eq!(crm.category(), ServiceCategory::Tech);
        assert!(store.service(ServiceCategory::Legal, "crm").is_err());
        assert_eq!(store.all_services().unwrap().len(), 4);
    }

    #[test]
    fn test_cases_by_service_type() {
        let (dir, store) = store();
        write(
            dir.path(),
            "cases/bot.md",
            "---\ntitle: Bot\ndate: 2024-03-01\nserviceType: tech\n---\nBot",
        );
        write(
            dir.path(),
            "cases/court.md",
            "---\ntitle: Court\ndate: 2024-04-01\nserviceType: legal\n---\nCourt",
        );

        let all = store.all_cases().unwrap();
        assert_eq!(all[0].slug, "court");

        let tech = store.cases_by_service_type(ServiceCategory::Tech).unwrap();
        assert_eq!(tech.len(), 1);
        assert_eq!(tech[0].slug, "bot");
    }

    #[test]
    fn test_price_list() {
        let (dir, store) = store();
        assert!(store.price_list().unwrap().is_empty());

        write(
            dir.path(),
            "prices.json",
            r#"[{"id":"arbitrage","practice":"legal","category":"Арбитраж","title":"Арбитражный спор",
                "description":"Ведение дела","price":50000,"priceFrom":true,"unit":"дело"},
               {"id":"crm","practice":"tech","category":"CRM","title":"Внедрение CRM",
                "price":120000,"unit":"проект","features":["Bitrix24"]}]"#,
        );
        let prices = store.price_list().unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].practice, ServiceCategory::Legal);
        assert!(prices[0].price_from);
        assert!(!prices[1].price_from);
        assert_eq!(prices[1].features, vec!["Bitrix24"]);

        write(dir.path(), "prices.json", r#"[{"id":"broken"}]"#);
        assert!(matches!(
            store.price_list(),
            Err(ContentError::PriceList { .. })
        ));
    }
}
