//! Helper functions shared by the SEO writers and HTTP handlers

mod messenger;
mod url;
mod xml;

pub use messenger::*;
pub use url::*;
pub use xml::*;
