//! Aggregate score statistics across the graded class.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::grader::GradedRow;

/// Class-wide score statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    /// Number of graded students.
    pub students: usize,
    /// Mean score.
    pub mean_score: f64,
    /// Median score; mean of the two middle values for even counts.
    pub median_score: f64,
    /// Lowest score.
    pub min_score: f64,
    /// Highest score.
    pub max_score: f64,
    /// Percentage of students at or above the pass threshold.
    pub pass_rate: f64,
    /// The threshold the pass rate was computed against. Caller-supplied
    /// and intentionally not range-checked.
    pub pass_threshold: f64,
}

/// Compute class statistics over the graded rows.
pub fn score_statistics(
    graded: &[GradedRow],
    pass_threshold: f64,
) -> Result<ScoreStatistics, AnalysisError> {
    if graded.is_empty() {
        return Err(AnalysisError::EmptyDataset(
            "no graded rows to summarize".into(),
        ));
    }

    let mut scores: Vec<f64> = graded.iter().map(|g| g.score).collect();
    scores.sort_by(f64::total_cmp);

    let n = scores.len();
    let mean_score = scores.iter().sum::<f64>() / n as f64;
    let median_score = if n % 2 == 1 {
        scores[n / 2]
    } else {
        (scores[n / 2 - 1] + scores[n / 2]) / 2.0
    };
    let passed = scores.iter().filter(|s| **s >= pass_threshold).count();

    Ok(ScoreStatistics {
        students: n,
        mean_score,
        median_score,
        min_score: scores[0],
        max_score: scores[n - 1],
        pass_rate: passed as f64 / n as f64 * 100.0,
        pass_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(score: f64) -> GradedRow {
        GradedRow {
            identifier: "s".into(),
            correctness: HashMap::new(),
            total_correct: 0,
            score,
        }
    }

    #[test]
    fn statistics_over_odd_count() {
        let graded = vec![row(40.0), row(80.0), row(60.0)];
        let stats = score_statistics(&graded, 70.0).unwrap();
        assert_eq!(stats.students, 3);
        assert!((stats.mean_score - 60.0).abs() < f64::EPSILON);
        assert!((stats.median_score - 60.0).abs() < f64::EPSILON);
        assert_eq!(stats.min_score, 40.0);
        assert_eq!(stats.max_score, 80.0);
    }

    #[test]
    fn median_of_even_count_averages_middles() {
        let graded = vec![row(20.0), row(40.0), row(60.0), row(100.0)];
        let stats = score_statistics(&graded, 50.0).unwrap();
        assert!((stats.median_score - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pass_rate_counts_threshold_as_passing() {
        let graded = vec![row(70.0), row(69.9), row(100.0), row(0.0)];
        let stats = score_statistics(&graded, 70.0).unwrap();
        assert!((stats.pass_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.pass_threshold, 70.0);
    }

    #[test]
    fn empty_input_is_empty_dataset_error() {
        let err = score_statistics(&[], 70.0).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset(_)));
    }
}
