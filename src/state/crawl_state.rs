use crate::model::{CrawlStats, ExternalLink};
use crate::state::CrawlPhase;
use crate::DiverError;
use std::collections::{BTreeSet, HashSet};

/// Traversal state for one crawl invocation
///
/// Created fresh by the orchestrator for every crawl and dropped once the
/// report has been assembled. The visited set is append-only.
#[derive(Debug)]
pub struct CrawlState {
    phase: CrawlPhase,
    visited: HashSet<String>,

    /// Internal links of the root page, plus everything merged after expansion
    pub internal: BTreeSet<String>,

    /// External links with the page they were found on
    pub external: BTreeSet<ExternalLink>,

    /// Email addresses from every fetched page
    pub emails: BTreeSet<String>,

    /// Fetch counters
    pub stats: CrawlStats,
}

impl CrawlState {
    pub fn new() -> Self {
        Self {
            phase: CrawlPhase::Start,
            visited: HashSet::new(),
            internal: BTreeSet::new(),
            external: BTreeSet::new(),
            emails: BTreeSet::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Moves to `to`, rejecting transitions the phase machine does not allow
    pub fn advance(&mut self, to: CrawlPhase) -> Result<(), DiverError> {
        if !self.phase.can_transition_to(to) {
            return Err(DiverError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!("Crawl phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Records `url` as visited, returning false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Returns true if `url` has been fetched (or attempted) in this crawl
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of distinct URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Folds the discoveries of an expansion pass into the result sets
    pub fn merge(&mut self, discoveries: Discoveries) {
        self.internal.extend(discoveries.internal);
        self.external.extend(discoveries.external);
        self.emails.extend(discoveries.emails);
    }
}

impl Default for CrawlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Links and emails found while expanding internal pages
///
/// Kept apart from `CrawlState` until the pass finishes so that expansion
/// iterates a fixed snapshot.
#[derive(Debug, Default)]
pub struct Discoveries {
    pub internal: BTreeSet<String>,
    pub external: BTreeSet<ExternalLink>,
    pub emails: BTreeSet<String>,
}
