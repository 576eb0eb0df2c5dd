//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the phase machine one crawl invocation walks through
//! - `CrawlState`: the traversal sets owned by the orchestrator for one invocation

mod crawl_phase;
mod crawl_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use crawl_state::{CrawlState, Discoveries};
