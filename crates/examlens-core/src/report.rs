//! Analysis report types with JSON persistence and markdown rendering.
//!
//! The report is the contract boundary between the analysis core and the
//! rendering/export collaborators: plain ordered-field records, no
//! rendering concerns baked in.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::difficulty::{sort_by_difficulty, DifficultyLabel, QuestionDifficulty};
use crate::grader::GradedRow;
use crate::recommend::{Recommendation, RemediationSummary};
use crate::statistics::ScoreStatistics;

/// One student's line in the per-student table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Student identifier.
    pub identifier: String,
    /// Correct responses.
    pub total_correct: u32,
    /// Percentage score.
    pub score: f64,
    /// Whether the score met the pass threshold.
    pub passed: bool,
}

/// One question's line in the per-question table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question identifier.
    pub question: String,
    /// Percentage of students answering correctly.
    pub correct_rate: f64,
    /// Difficulty band.
    pub difficulty: DifficultyLabel,
}

/// A complete analysis report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Identifier column the run was configured with.
    pub identifier_column: String,
    /// Pass threshold the student table was derived against.
    pub pass_threshold: f64,
    /// Students, sorted descending by score (ties keep input order).
    pub students: Vec<StudentRecord>,
    /// Questions, sorted ascending by correct rate (hardest first).
    pub questions: Vec<QuestionRecord>,
    /// Remedial recommendations, hardest first.
    pub recommendations: Vec<Recommendation>,
    /// Class score statistics.
    pub statistics: ScoreStatistics,
    /// Flagged-question ratio and severity.
    pub remediation: RemediationSummary,
}

impl ExamReport {
    /// Assemble a report from the pipeline's outputs.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        identifier_column: &str,
        pass_threshold: f64,
        graded: &[GradedRow],
        difficulty: &std::collections::HashMap<String, QuestionDifficulty>,
        questions: &[String],
        recommendations: Vec<Recommendation>,
        statistics: ScoreStatistics,
        remediation: RemediationSummary,
    ) -> Self {
        let mut students: Vec<StudentRecord> = graded
            .iter()
            .map(|g| StudentRecord {
                identifier: g.identifier.clone(),
                total_correct: g.total_correct,
                score: g.score,
                passed: g.score >= pass_threshold,
            })
            .collect();
        // Stable: equal scores keep their input order
        students.sort_by(|a, b| b.score.total_cmp(&a.score));

        let questions = sort_by_difficulty(difficulty, questions)
            .into_iter()
            .map(|d| QuestionRecord {
                question: d.question,
                correct_rate: d.correct_rate,
                difficulty: d.label,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            identifier_column: identifier_column.to_string(),
            pass_threshold,
            students,
            questions,
            recommendations,
            statistics,
            remediation,
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} students, {} questions, {} flagged for remediation ({:.1}%)\n\n",
            self.students.len(),
            self.questions.len(),
            self.remediation.flagged,
            self.remediation.flagged_ratio,
        ));

        md.push_str("### Class Statistics\n\n");
        md.push_str(&format!(
            "Mean {:.2} | Median {:.2} | Min {:.2} | Max {:.2} | Pass rate {:.1}% (threshold {:.0})\n\n",
            self.statistics.mean_score,
            self.statistics.median_score,
            self.statistics.min_score,
            self.statistics.max_score,
            self.statistics.pass_rate,
            self.statistics.pass_threshold,
        ));

        md.push_str("### Students\n\n");
        md.push_str("| Student | Correct | Score | Status |\n");
        md.push_str("|---------|---------|-------|--------|\n");
        for s in &self.students {
            md.push_str(&format!(
                "| {} | {} | {:.1} | {} |\n",
                s.identifier,
                s.total_correct,
                s.score,
                if s.passed { "pass" } else { "fail" }
            ));
        }
        md.push('\n');

        md.push_str("### Question Difficulty\n\n");
        md.push_str("| Question | Correct Rate | Difficulty |\n");
        md.push_str("|----------|--------------|------------|\n");
        for q in &self.questions {
            md.push_str(&format!(
                "| {} | {:.1}% | {} |\n",
                q.question, q.correct_rate, q.difficulty
            ));
        }
        md.push('\n');

        if !self.recommendations.is_empty() {
            md.push_str("### Remedial Recommendations\n\n");
            md.push_str("| Question | Topic | Correct Rate | Advice |\n");
            md.push_str("|----------|-------|--------------|--------|\n");
            for r in &self.recommendations {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {} |\n",
                    r.question, r.topic, r.correct_rate, r.advice
                ));
            }
            md.push('\n');
        }

        md.push_str(&format!("> {}\n", self.remediation.severity.message()));

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyBands;
    use crate::recommend::remediation_summary;
    use std::collections::HashMap;

    fn graded(identifier: &str, total_correct: u32, score: f64) -> GradedRow {
        GradedRow {
            identifier: identifier.into(),
            correctness: HashMap::new(),
            total_correct,
            score,
        }
    }

    fn sample_report() -> ExamReport {
        let bands = DifficultyBands::default();
        let questions: Vec<String> = vec!["Q1".into(), "Q2".into()];
        let mut difficulty = HashMap::new();
        for (q, rate) in [("Q1", 40.0), ("Q2", 80.0)] {
            difficulty.insert(
                q.to_string(),
                QuestionDifficulty {
                    question: q.to_string(),
                    correct_rate: rate,
                    label: bands.classify(rate),
                },
            );
        }
        let rows = vec![
            graded("Alice", 1, 50.0),
            graded("Bob", 2, 100.0),
            graded("Cara", 1, 50.0),
        ];
        let stats = crate::statistics::score_statistics(&rows, 70.0).unwrap();

        ExamReport::assemble(
            "Name",
            70.0,
            &rows,
            &difficulty,
            &questions,
            vec![Recommendation {
                question: "Q1".into(),
                topic: "Topic for Q1".into(),
                correct_rate: 40.0,
                advice: "Review recommended for topic 'Topic for Q1'".into(),
            }],
            stats,
            remediation_summary(1, 2),
        )
    }

    #[test]
    fn students_sorted_descending_with_stable_ties() {
        let report = sample_report();
        let order: Vec<&str> = report.students.iter().map(|s| s.identifier.as_str()).collect();
        // Alice and Cara tie at 50.0 and keep their input order
        assert_eq!(order, vec!["Bob", "Alice", "Cara"]);
        assert!(report.students[0].passed);
        assert!(!report.students[1].passed);
    }

    #[test]
    fn questions_sorted_hardest_first() {
        let report = sample_report();
        assert_eq!(report.questions[0].question, "Q1");
        assert_eq!(report.questions[0].difficulty, DifficultyLabel::Hard);
        assert_eq!(report.questions[1].question, "Q2");
    }

    #[test]
    fn json_roundtrip() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = ExamReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.students, report.students);
        assert_eq!(loaded.questions, report.questions);
        assert_eq!(loaded.recommendations, report.recommendations);
    }

    #[test]
    fn markdown_output() {
        let md = sample_report().to_markdown();
        assert!(md.contains("### Students"));
        assert!(md.contains("| Bob | 2 | 100.0 | pass |"));
        assert!(md.contains("### Question Difficulty"));
        assert!(md.contains("Remedial Recommendations"));
        assert!(md.contains("Focus remediation"));
    }
}
