//! Cleaning advice and data-quality reporting.

mod advisor;
mod heuristics;
mod report;

pub use advisor::{Advisor, summarize};
pub use heuristics::heuristic_suggestions;
pub use report::quality_report;
