//! Delimited-text (CSV) export of the three report tables.
//!
//! Field order follows the report contract: the tables are exportable
//! verbatim, independent of how the hosting application renders them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use examlens_core::report::ExamReport;

fn writer_to_string(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).context("csv output was not valid UTF-8")
}

/// The per-student table: identifier, total correct, score, status.
pub fn student_csv(report: &ExamReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Student", "Correct", "Score", "Status"])?;
    for s in &report.students {
        wtr.write_record([
            s.identifier.as_str(),
            &s.total_correct.to_string(),
            &format!("{:.2}", s.score),
            if s.passed { "pass" } else { "fail" },
        ])?;
    }
    writer_to_string(wtr)
}

/// The per-question table: question, correct rate, difficulty label.
pub fn question_csv(report: &ExamReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Question", "Correct Rate", "Difficulty"])?;
    for q in &report.questions {
        wtr.write_record([
            q.question.as_str(),
            &format!("{:.2}", q.correct_rate),
            &q.difficulty.to_string(),
        ])?;
    }
    writer_to_string(wtr)
}

/// The recommendation table: question, topic, correct rate, advice.
pub fn recommendation_csv(report: &ExamReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Question", "Topic", "Correct Rate", "Recommendation"])?;
    for r in &report.recommendations {
        wtr.write_record([
            r.question.as_str(),
            r.topic.as_str(),
            &format!("{:.2}", r.correct_rate),
            r.advice.as_str(),
        ])?;
    }
    writer_to_string(wtr)
}

/// Write all three tables into `dir` and return the paths written.
pub fn write_csv_reports(report: &ExamReport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let tables = [
        ("students.csv", student_csv(report)?),
        ("questions.csv", question_csv(report)?),
        ("recommendations.csv", recommendation_csv(report)?),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, content) in tables {
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
