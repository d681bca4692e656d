//! Markdown report file generation.

use std::path::Path;

use anyhow::{Context, Result};

use examlens_core::report::ExamReport;

/// Render a self-contained markdown document for an analysis report.
pub fn generate_markdown(report: &ExamReport) -> String {
    let mut md = String::new();

    md.push_str("# Exam Analysis Report\n\n");
    md.push_str(&format!(
        "Generated {} | report {}\n\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id,
    ));
    md.push_str(&report.to_markdown());

    md
}

/// Write the markdown report to a file, creating parent directories.
pub fn write_markdown_report(report: &ExamReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(report))
        .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
    Ok(())
}
