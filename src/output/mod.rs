//! Output module for persisting and presenting crawl results
//!
//! This module handles:
//! - Spilling large link sets to per-host files
//! - Writing the per-host meta data file
//! - Rendering the console report

mod error;
pub mod report;
mod sink;

pub use error::{OutputError, OutputResult};
pub use report::{print_banner, print_no_data, print_report, render_json, render_report};
pub use sink::{Emitted, ResultSink, DEFAULT_SPILL_THRESHOLD};
