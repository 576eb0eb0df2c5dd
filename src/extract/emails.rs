//! Email address extraction

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("Failed to compile email regex"));

/// Scans raw HTML text for email-shaped tokens
///
/// No validation beyond the `local@domain.tld` shape is performed; duplicates
/// collapse into one entry.
///
/// # Example
///
/// ```
/// use webdiver::extract::extract_emails;
///
/// let emails = extract_emails("<p>info@example.com, info@example.com</p>");
/// assert_eq!(emails.len(), 1);
/// ```
pub fn extract_emails(html: &str) -> BTreeSet<String> {
    EMAIL_RE
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}
