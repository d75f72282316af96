//! Site configuration (_config.yml + environment overrides)

use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,
    pub language: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub messenger: MessengerConfig,
    #[serde(default)]
    pub organization: OrganizationConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Uralliance".to_string(),
            description: "Юридические услуги и IT-решения для бизнеса".to_string(),
            url: "https://uralliance.ru".to_string(),
            language: "ru".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            server: ServerConfig::default(),
            highlight: HighlightConfig::default(),
            telegram: TelegramConfig::default(),
            seo: SeoConfig::default(),
            feed: FeedConfig::default(),
            messenger: MessengerConfig::default(),
            organization: OrganizationConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("SITE_URL") {
            self.url = url;
        }
        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }
        if let Some(chat_id) = get("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = Some(chat_id);
        }
        if let Some(phone) = get("WHATSAPP_PHONE") {
            self.messenger.whatsapp_phone = phone;
        }
        if let Some(username) = get("TELEGRAM_USERNAME") {
            self.messenger.telegram_username = username;
        }
    }

    /// Validate values that cannot be checked by deserialization alone
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            bail!("url must start with http:// or https://, got '{}'", self.url);
        }
        if self.feed.limit == 0 {
            bail!("feed.limit must be greater than 0");
        }
        Ok(())
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Logs a summary without secrets
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Site URL: {}", self.url);
        tracing::info!("  Content dir: {}", self.content_dir);
        tracing::info!(
            "  Telegram relay: {}",
            if self.telegram.is_configured() {
                "configured"
            } else {
                "not configured"
            }
        );
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Highlight fenced code in blog posts
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Telegram bot relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_base: String,
    pub parse_mode: String,
    #[serde(skip_serializing)]
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            parse_mode: "MarkdownV2".to_string(),
            bot_token: None,
            chat_id: None,
        }
    }
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.bot_token) && present(&self.chat_id)
    }
}

/// SEO configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Service key -> top-level path overriding `/services/{category}/{slug}`.
    ///
    /// Keys are `category/slug` (`legal/ecp`) or a bare slug. A qualified key
    /// wins over a bare one; a bare slug matches that slug in every category.
    pub vanity_urls: IndexMap<String, String>,

    /// Page path -> crumb for pages outside `/services/{category}/{slug}`
    pub breadcrumbs: IndexMap<String, BreadcrumbConfig>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        let vanity_urls = [
            ("legal/ecp", "/ecp"),
            ("legal/edo", "/edo"),
            ("legal/fedresurs", "/fedresurs"),
            ("legal/liquidation", "/liquidation"),
            ("legal/corporate", "/corporate"),
            ("tech/web", "/web"),
            ("tech/ai", "/ai-training"),
        ]
        .into_iter()
        .map(|(key, path)| (key.to_string(), path.to_string()))
        .collect();

        let legal = || BreadcrumbLink::new("Юридические услуги", "/services/legal");
        let tech = || BreadcrumbLink::new("IT-решения", "/services/tech");
        let breadcrumbs = [
            ("/liquidation", "Ликвидация организаций", Some(legal())),
            ("/fedresurs", "Федресурс", Some(legal())),
            ("/edo", "Электронный документооборот", Some(legal())),
            ("/ecp", "ЭЦП и Рутокены", Some(legal())),
            ("/max", "MAX — AI-ассистент", Some(tech())),
            ("/web", "Разработка сайтов", Some(tech())),
            ("/services/legal", "Юридические услуги", None),
            ("/services/tech", "IT-решения", None),
            ("/price", "Цены", None),
            ("/privacy", "Политика конфиденциальности", None),
            ("/terms", "Условия использования", None),
        ]
        .into_iter()
        .map(|(path, label, parent)| {
            let crumb = BreadcrumbConfig {
                label: label.to_string(),
                parent,
            };
            (path.to_string(), crumb)
        })
        .collect();

        Self {
            vanity_urls,
            breadcrumbs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<BreadcrumbLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbLink {
    pub label: String,
    pub href: String,
}

impl BreadcrumbLink {
    pub fn new(label: &str, href: &str) -> Self {
        BreadcrumbLink {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Company details published as schema.org JSON-LD
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    pub name: String,
    /// Site-relative or absolute logo URL
    pub logo: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub address: PostalAddress,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_days: Vec<String>,
    pub opens: String,
    pub closes: String,
    /// Social profiles
    pub same_as: Vec<String>,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "Uralliance".to_string(),
            logo: "/images/logo.svg".to_string(),
            description: "Uralliance — Legal + Tech команда из Екатеринбурга. Сопровождаем сложные юридические кейсы и внедряем цифровые продукты.".to_string(),
            phone: "+7 (343) 123-45-67".to_string(),
            email: "info@uralliance.ru".to_string(),
            address: PostalAddress::default(),
            latitude: 56.838011,
            longitude: 60.597474,
            opening_days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            opens: "09:00".to_string(),
            closes: "18:00".to_string(),
            same_as: vec![
                "https://t.me/uralliance".to_string(),
                "https://www.linkedin.com/company/uralliance".to_string(),
                "https://vk.com/uralliance".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for PostalAddress {
    fn default() -> Self {
        Self {
            street_address: "ул. Малышева, 51".to_string(),
            locality: "Екатеринбург".to_string(),
            region: "Свердловская область".to_string(),
            postal_code: "620014".to_string(),
            country: "RU".to_string(),
        }
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

/// Defaults for pre-filled messenger links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessengerConfig {
    pub whatsapp_phone: String,
    pub telegram_username: String,
    pub email: String,
    pub email_subject: String,
    pub default_message: String,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            whatsapp_phone: "79000000000".to_string(),
            telegram_username: "uralliance".to_string(),
            email: "info@uralliance.ru".to_string(),
            email_subject: "Запрос с сайта Uralliance".to_string(),
            default_message:
                "Здравствуйте! Я обращаюсь с сайта Uralliance. Хочу узнать больше о ваших услугах."
                    .to_string(),
        }
    }
}
