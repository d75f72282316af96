//! Configuration module

mod site;

pub use site::BreadcrumbConfig;
pub use site::BreadcrumbLink;
pub use site::FeedConfig;
pub use site::HighlightConfig;
pub use site::MessengerConfig;
pub use site::OrganizationConfig;
pub use site::PostalAddress;
pub use site::SeoConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::TelegramConfig;
