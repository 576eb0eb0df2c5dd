//! Crawl phase definitions for tracking the progress of one crawl invocation
//!
//! The orchestrator walks these phases in a fixed order; only root fetch and
//! enrichment may fail the whole crawl.
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Active Phases =====
    /// Nothing has happened yet
    Start,

    /// Fetching the target URL
    FetchRoot,

    /// Extracting meta data, links and emails from the root page
    ExtractRoot,

    /// Fetching the snapshot of internal links found on the root page
    ExpandInternal,

    /// Folding discovered links and emails into the result sets
    Merge,

    /// Looking up IP information for the target host
    Enrich,

    // ===== Terminal Phases =====
    /// Report assembled and handed to the result sink
    Done,

    /// Root unreachable or enrichment failed, no report produced
    Failed,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if this phase may transition to `Failed`
    pub fn can_fail(&self) -> bool {
        matches!(self, Self::FetchRoot | Self::Enrich)
    }

    /// Returns the phase that follows this one on the success path
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::FetchRoot),
            Self::FetchRoot => Some(Self::ExtractRoot),
            Self::ExtractRoot => Some(Self::ExpandInternal),
            Self::ExpandInternal => Some(Self::Merge),
            Self::Merge => Some(Self::Enrich),
            Self::Enrich => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Returns true if moving from `self` to `to` is allowed
    pub fn can_transition_to(&self, to: Self) -> bool {
        if to == Self::Failed {
            return self.can_fail();
        }
        self.next() == Some(to)
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FetchRoot => "fetch_root",
            Self::ExtractRoot => "extract_root",
            Self::ExpandInternal => "expand_internal",
            Self::Merge => "merge",
            Self::Enrich => "enrich",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all phases in success-path order, followed by `Failed`
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Start,
            Self::FetchRoot,
            Self::ExtractRoot,
            Self::ExpandInternal,
            Self::Merge,
            Self::Enrich,
            Self::Done,
            Self::Failed,
        ]
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
