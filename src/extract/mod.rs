//! Content extractors
//!
//! This module pulls structured data out of fetched HTML:
//! - Page title, meta description and meta tags
//! - Email addresses

mod emails;
mod meta;

pub use emails::extract_emails;
pub use meta::{extract_meta, MetaKey, PageMeta, NO_DESCRIPTION, NO_TITLE};
