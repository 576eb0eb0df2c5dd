//! Result sink
//!
//! Decides per link category whether results stay inline or spill to a
//! per-host file, and always writes the meta data file.

use crate::config::Config;
use crate::model::CrawlResult;
use crate::output::error::{OutputError, OutputResult};
use crate::url::extract_host;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Default number of links shown inline per category
pub const DEFAULT_SPILL_THRESHOLD: usize = 20;

/// What the sink produced for one crawl
#[derive(Debug, Clone)]
pub struct Emitted {
    /// The result to display, link sets truncated where they spilled
    pub display: CrawlResult,

    /// Full internal link file, when the set spilled
    pub internal_links_file: Option<PathBuf>,

    /// Full external link file, when the set spilled
    pub external_links_file: Option<PathBuf>,

    /// Meta data file, always written
    pub meta_file: PathBuf,
}

/// Writes crawl results to the output directory
#[derive(Debug, Clone)]
pub struct ResultSink {
    output_dir: PathBuf,
    threshold: usize,
}

impl ResultSink {
    pub fn new(output_dir: impl Into<PathBuf>, threshold: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            threshold,
        }
    }

    /// Creates a sink using the configured spill threshold
    pub fn from_config(output_dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(output_dir, config.output.spill_threshold)
    }

    /// Persists `result` and returns the view to display
    ///
    /// # File Rules
    ///
    /// | File | Written when | Line format |
    /// |------|--------------|-------------|
    /// | `<host>_internal_links.txt` | more than `threshold` internal links | `url` |
    /// | `<host>_external_links.txt` | more than `threshold` external links | `url (from origin)` |
    /// | `<host>_meta.txt` | always | title, url, `key: value` |
    ///
    /// Files always hold the full sets; only the returned view is truncated.
    pub fn emit(&self, result: &CrawlResult) -> OutputResult<Emitted> {
        let host = Url::parse(&result.url)
            .ok()
            .as_ref()
            .and_then(extract_host)
            .ok_or_else(|| OutputError::MissingHost(result.url.clone()))?;

        let mut display = result.clone();

        let internal_links_file = if result.internal_links.len() > self.threshold {
            let path = self.file_path(&host, "internal_links");
            write_lines(&path, &result.internal_links)?;
            tracing::info!(
                "Saved {} internal links to {}",
                result.internal_links.len(),
                path.display()
            );
            display.internal_links = truncate(&result.internal_links, self.threshold);
            Some(path)
        } else {
            None
        };

        let external_links_file = if result.external_links.len() > self.threshold {
            let path = self.file_path(&host, "external_links");
            write_lines(&path, &result.external_links)?;
            tracing::info!(
                "Saved {} external links to {}",
                result.external_links.len(),
                path.display()
            );
            display.external_links = truncate(&result.external_links, self.threshold);
            Some(path)
        } else {
            None
        };

        let meta_file = self.file_path(&host, "meta");
        write_meta(&meta_file, result)?;

        Ok(Emitted {
            display,
            internal_links_file,
            external_links_file,
            meta_file,
        })
    }

    fn file_path(&self, host: &str, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}.txt", host, suffix))
    }
}

/// Keeps the first `limit` entries of an ordered set
fn truncate<T: Ord + Clone>(set: &BTreeSet<T>, limit: usize) -> BTreeSet<T> {
    set.iter().take(limit).cloned().collect()
}

fn create(path: &Path) -> OutputResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| write_error(path, source))
}

fn write_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Write {
        path: path.display().to_string(),
        source,
    }
}

/// Writes one entry per line
fn write_lines<T: Display>(path: &Path, entries: &BTreeSet<T>) -> OutputResult<()> {
    let mut file = create(path)?;
    for entry in entries {
        writeln!(file, "{}", entry).map_err(|e| write_error(path, e))?;
    }
    file.flush().map_err(|e| write_error(path, e))
}

/// Writes the title, URL and every meta entry
fn write_meta(path: &Path, result: &CrawlResult) -> OutputResult<()> {
    let mut file = create(path)?;
    let mut body = String::new();

    body.push_str(&format!("Title: {}\n", result.title));
    body.push_str(&format!("URL: {}\n", result.url));
    body.push_str("Meta Data:\n");
    for (key, value) in &result.meta_data {
        body.push_str(&format!("  {}: {}\n", key, value));
    }

    file.write_all(body.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| write_error(path, e))
}
