//! Content module - blog posts, services, case studies and markdown processing

mod anchor;
mod document;
mod error;
pub mod frontmatter;
pub mod loader;
mod markdown;

pub use anchor::{slugify_heading, HeadingSlugger};
pub use document::{
    BlogPost, CaseStudy, Document, PriceItem, Service, ServiceCategory, ServiceRef,
};
pub use error::ContentError;
pub use frontmatter::{BlogFrontMatter, CaseFrontMatter, ServiceFrontMatter};
pub use loader::ContentStore;
pub use markdown::MarkdownRenderer;

