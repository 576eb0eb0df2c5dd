//! Title, description and meta tag extraction

use crate::model::MetaRecord;
use scraper::{ElementRef, Html, Selector};

/// Title reported when a page has no usable `<title>`
pub const NO_TITLE: &str = "No title";

/// Description reported when a page has no usable meta description
pub const NO_DESCRIPTION: &str = "No description";

/// Page-level metadata extracted from the root document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// Trimmed `<title>` text, or [`NO_TITLE`]
    pub title: String,

    /// Trimmed meta description, or [`NO_DESCRIPTION`]
    pub description: String,

    /// Every meta tag with a resolvable key
    pub meta: MetaRecord,
}

/// The attribute a `<meta>` tag is keyed by
///
/// When a tag carries several candidates only one key is recorded, by
/// priority: `name`, then `property`, then `http-equiv`, then `charset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaKey {
    Name(String),
    Property(String),
    HttpEquiv(String),
    Charset,
}

impl MetaKey {
    /// Resolves the key of a meta tag from its attributes
    pub fn resolve<'a>(attr: impl Fn(&str) -> Option<&'a str>) -> Option<Self> {
        if let Some(name) = attr("name") {
            return Some(Self::Name(name.to_string()));
        }
        if let Some(property) = attr("property") {
            return Some(Self::Property(property.to_string()));
        }
        if let Some(equiv) = attr("http-equiv") {
            return Some(Self::HttpEquiv(equiv.to_string()));
        }
        attr("charset").map(|_| Self::Charset)
    }

    /// The string used as the key in the meta record
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(key) | Self::Property(key) | Self::HttpEquiv(key) => key,
            Self::Charset => "charset",
        }
    }

    /// The attribute holding this key's value
    fn value_attribute(&self) -> &'static str {
        match self {
            Self::Charset => "charset",
            _ => "content",
        }
    }
}

/// Extracts title, description and all meta tags from an HTML page
///
/// # Example
///
/// ```
/// use webdiver::extract::extract_meta;
///
/// let html = r#"<html><head><title> Example </title>
///     <meta name="description" content="An example page">
///     <meta charset="utf-8"></head></html>"#;
/// let meta = extract_meta(html);
/// assert_eq!(meta.title, "Example");
/// assert_eq!(meta.description, "An example page");
/// assert_eq!(meta.meta.get("charset").map(String::as_str), Some("utf-8"));
/// ```
pub fn extract_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);

    PageMeta {
        title: extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string()),
        description: extract_description(&document)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        meta: extract_meta_tags(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Extracts the `content` of `<meta name="description">`
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// Collects every keyed meta tag, later duplicates overwriting earlier ones
fn extract_meta_tags(document: &Html) -> MetaRecord {
    let mut record = MetaRecord::new();

    let Ok(selector) = Selector::parse("meta") else {
        return record;
    };

    for element in document.select(&selector) {
        if let Some((key, value)) = meta_entry(element) {
            record.insert(key, value);
        }
    }

    record
}

fn meta_entry(element: ElementRef<'_>) -> Option<(String, String)> {
    let tag = element.value();
    let key = MetaKey::resolve(|attr| tag.attr(attr))?;
    let value = tag.attr(key.value_attribute()).unwrap_or("").to_string();
    Some((key.as_str().to_string(), value))
}
