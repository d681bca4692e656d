//! The `examlens analyze` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use examlens_core::engine::{AnalysisConfig, AnalysisEngine};
use examlens_core::error::AnalysisError;
use examlens_core::model::KeySource;
use examlens_core::parser;
use examlens_core::report::ExamReport;
use examlens_report::export::write_csv_reports;
use examlens_report::markdown::write_markdown_report;

use crate::config::{load_config_from, load_topic_map};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    input: PathBuf,
    key_path: Option<PathBuf>,
    key_in_first_row: bool,
    identifier_column: Option<String>,
    pass_threshold: Option<f64>,
    topics_path: Option<PathBuf>,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let table = parser::parse_table(&input)?;

    // Resolve the key source up front; grading must not start without one.
    let key_source = match (&key_path, key_in_first_row) {
        (Some(path), first_row) => {
            if first_row {
                tracing::warn!("--key-in-first-row ignored because --key was given");
            }
            KeySource::External(parser::parse_table(path)?)
        }
        (None, true) => KeySource::FirstRow,
        (None, false) => {
            return Err(AnalysisError::Configuration(
                "no key source: pass --key <file> or --key-in-first-row".into(),
            )
            .into());
        }
    };

    let topics = match topics_path.or(config.topics) {
        Some(path) => Some(load_topic_map(&path)?),
        None => None,
    };

    let engine = AnalysisEngine::new(AnalysisConfig {
        identifier_column: identifier_column.unwrap_or(config.identifier_column),
        pass_threshold: pass_threshold.unwrap_or(config.pass_threshold),
        topics,
        ..AnalysisConfig::default()
    });

    let report = engine.run(&table, &key_source)?;

    match format.as_str() {
        "json" => {
            let path = output.join("report.json");
            report.save_json(&path)?;
            println!("Wrote {}", path.display());
        }
        "markdown" | "md" => {
            let path = output.join("analysis.md");
            write_markdown_report(&report, &path)?;
            println!("Wrote {}", path.display());
        }
        "csv" => {
            for path in write_csv_reports(&report, &output)? {
                println!("Wrote {}", path.display());
            }
        }
        "all" => {
            print_tables(&report);
            let json_path = output.join("report.json");
            report.save_json(&json_path)?;
            println!("Wrote {}", json_path.display());
            let md_path = output.join("analysis.md");
            write_markdown_report(&report, &md_path)?;
            println!("Wrote {}", md_path.display());
            for path in write_csv_reports(&report, &output)? {
                println!("Wrote {}", path.display());
            }
        }
        _ => print_tables(&report),
    }

    Ok(())
}

fn print_tables(report: &ExamReport) {
    let stats = &report.statistics;
    println!(
        "Class: {} students | mean {:.2} | median {:.2} | min {:.2} | max {:.2} | pass rate {:.1}% (threshold {:.0})",
        stats.students,
        stats.mean_score,
        stats.median_score,
        stats.min_score,
        stats.max_score,
        stats.pass_rate,
        stats.pass_threshold,
    );

    let mut students = Table::new();
    students
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Student", "Correct", "Score", "Status"]);
    for s in &report.students {
        students.add_row(vec![
            s.identifier.clone(),
            s.total_correct.to_string(),
            format!("{:.1}", s.score),
            if s.passed { "pass" } else { "fail" }.to_string(),
        ]);
    }
    println!("\nStudents:\n{students}");

    let mut questions = Table::new();
    questions
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Question", "Correct Rate", "Difficulty"]);
    for q in &report.questions {
        questions.add_row(vec![
            q.question.clone(),
            format!("{:.1}%", q.correct_rate),
            q.difficulty.to_string(),
        ]);
    }
    println!("\nQuestion difficulty (hardest first):\n{questions}");

    if report.recommendations.is_empty() {
        println!("\nNo topics need remediation.");
    } else {
        let mut recs = Table::new();
        recs.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Question", "Topic", "Correct Rate", "Recommendation"]);
        for r in &report.recommendations {
            recs.add_row(vec![
                r.question.clone(),
                r.topic.clone(),
                format!("{:.1}%", r.correct_rate),
                r.advice.clone(),
            ]);
        }
        println!("\nRemedial recommendations:\n{recs}");
    }

    println!("\n{}", report.remediation.severity.message());
}
