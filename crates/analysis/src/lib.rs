//! # clearview-analysis
//!
//! Per-column summary statistics and plain-text reporting over loaded
//! datasets.

mod report;
mod summary;

pub use report::render_report;
pub use summary::{ColumnSummary, summarize};
