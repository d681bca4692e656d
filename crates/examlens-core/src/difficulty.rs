//! Per-question difficulty analysis.
//!
//! Computes the class-wide correct-response rate for every keyed question
//! and maps it onto five ordinal difficulty bands.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::grader::GradedRow;

/// Ordinal difficulty classification of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLabel {
    #[serde(rename = "Very Hard")]
    VeryHard,
    Hard,
    Medium,
    Easy,
    #[serde(rename = "Very Easy")]
    VeryEasy,
}

impl fmt::Display for DifficultyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLabel::VeryHard => write!(f, "Very Hard"),
            DifficultyLabel::Hard => write!(f, "Hard"),
            DifficultyLabel::Medium => write!(f, "Medium"),
            DifficultyLabel::Easy => write!(f, "Easy"),
            DifficultyLabel::VeryEasy => write!(f, "Very Easy"),
        }
    }
}

/// Band edges for difficulty classification, as correct-rate upper bounds
/// (exclusive). Lower bounds are inclusive: a rate of exactly 50.0 is
/// Medium, not Hard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBands {
    /// Below this: Very Hard.
    pub very_hard_below: f64,
    /// Below this: Hard.
    pub hard_below: f64,
    /// Below this: Medium.
    pub medium_below: f64,
    /// Below this: Easy. At or above: Very Easy.
    pub easy_below: f64,
}

impl Default for DifficultyBands {
    fn default() -> Self {
        Self {
            very_hard_below: 30.0,
            hard_below: 50.0,
            medium_below: 70.0,
            easy_below: 90.0,
        }
    }
}

impl DifficultyBands {
    /// Classify a correct rate (0–100) into its band.
    pub fn classify(&self, correct_rate: f64) -> DifficultyLabel {
        if correct_rate < self.very_hard_below {
            DifficultyLabel::VeryHard
        } else if correct_rate < self.hard_below {
            DifficultyLabel::Hard
        } else if correct_rate < self.medium_below {
            DifficultyLabel::Medium
        } else if correct_rate < self.easy_below {
            DifficultyLabel::Easy
        } else {
            DifficultyLabel::VeryEasy
        }
    }
}

/// Difficulty metrics for a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDifficulty {
    /// Question identifier.
    pub question: String,
    /// Percentage of students answering correctly, 0–100.
    pub correct_rate: f64,
    /// Band the correct rate falls into.
    pub label: DifficultyLabel,
}

/// Compute per-question difficulty over the full graded set.
///
/// Fails with [`AnalysisError::EmptyDataset`] when there are zero graded
/// rows — a correct rate over nobody is undefined.
pub fn analyze(
    graded: &[GradedRow],
    questions: &[String],
    bands: &DifficultyBands,
) -> Result<HashMap<String, QuestionDifficulty>, AnalysisError> {
    if graded.is_empty() {
        return Err(AnalysisError::EmptyDataset(
            "no graded rows to analyze".into(),
        ));
    }

    let students = graded.len() as f64;
    let mut difficulty = HashMap::with_capacity(questions.len());

    for q in questions {
        let correct = graded
            .iter()
            .filter(|g| g.correctness.get(q).copied().unwrap_or(false))
            .count() as f64;
        let correct_rate = correct / students * 100.0;

        difficulty.insert(
            q.clone(),
            QuestionDifficulty {
                question: q.clone(),
                correct_rate,
                label: bands.classify(correct_rate),
            },
        );
    }

    Ok(difficulty)
}

/// Order difficulties ascending by correct rate (hardest first), ties
/// broken by original question order. The sort is stable, so rerunning on
/// identical input yields an identical sequence.
pub fn sort_by_difficulty(
    difficulty: &HashMap<String, QuestionDifficulty>,
    questions: &[String],
) -> Vec<QuestionDifficulty> {
    let mut ordered: Vec<QuestionDifficulty> = questions
        .iter()
        .filter_map(|q| difficulty.get(q).cloned())
        .collect();
    ordered.sort_by(|a, b| a.correct_rate.total_cmp(&b.correct_rate));
    ordered
}
