//! examlens-report — Export collaborators for analysis reports.
//!
//! Renders an `ExamReport` into the formats consumed outside the core:
//! delimited-text tables and a markdown summary.

pub mod export;
pub mod markdown;
