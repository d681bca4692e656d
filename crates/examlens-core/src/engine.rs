//! Pipeline orchestrator.
//!
//! One analysis run is a pure, synchronous transformation:
//! resolve key -> grade -> difficulty -> recommend -> statistics ->
//! assemble. Each run reads a single consistent snapshot of its inputs
//! and holds no state afterwards; concurrent runs are fully independent.

use crate::difficulty::{self, DifficultyBands};
use crate::error::AnalysisError;
use crate::grader;
use crate::key;
use crate::model::{KeySource, ResponseTable, TopicMap};
use crate::recommend::{self, REMEDIAL_THRESHOLD};
use crate::report::ExamReport;
use crate::statistics;

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Name of the column holding student identifiers.
    pub identifier_column: String,
    /// Pass threshold for the per-student pass/fail status. Presentation
    /// only; grading and difficulty ignore it. Intentionally not
    /// range-checked.
    pub pass_threshold: f64,
    /// Correct-rate cutoff for remedial recommendations.
    pub remedial_threshold: f64,
    /// Difficulty band edges.
    pub bands: DifficultyBands,
    /// Optional question -> topic mapping.
    pub topics: Option<TopicMap>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            identifier_column: "Name".into(),
            pass_threshold: 70.0,
            remedial_threshold: REMEDIAL_THRESHOLD,
            bands: DifficultyBands::default(),
            topics: None,
        }
    }
}

/// The analysis engine: runs the full scoring and diagnostic pipeline.
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline over one response table.
    ///
    /// Returns a complete [`ExamReport`] or the first stage failure;
    /// never a partially populated report.
    pub fn run(
        &self,
        table: &ResponseTable,
        key_source: &KeySource,
    ) -> Result<ExamReport, AnalysisError> {
        let cfg = &self.config;

        let (working, answer_key) = key::resolve(table, key_source, &cfg.identifier_column)?;
        tracing::debug!(
            students = working.len(),
            questions = answer_key.len(),
            "key resolved"
        );

        let graded = grader::grade(&working, &answer_key, &cfg.identifier_column)?;
        let difficulty = difficulty::analyze(&graded, &answer_key.questions, &cfg.bands)?;
        let recommendations = recommend::recommend(
            &difficulty,
            &answer_key.questions,
            cfg.topics.as_ref(),
            cfg.remedial_threshold,
        );
        let remediation =
            recommend::remediation_summary(recommendations.len(), answer_key.len());
        let stats = statistics::score_statistics(&graded, cfg.pass_threshold)?;

        tracing::info!(
            students = graded.len(),
            flagged = remediation.flagged,
            severity = %remediation.severity,
            "analysis complete"
        );

        Ok(ExamReport::assemble(
            &cfg.identifier_column,
            cfg.pass_threshold,
            &graded,
            &difficulty,
            &answer_key.questions,
            recommendations,
            stats,
            remediation,
        ))
    }
}
