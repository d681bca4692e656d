//! Remedial topic recommendations.
//!
//! Questions whose correct rate falls below the remedial threshold each
//! produce one recommendation, emitted hardest-first. The flagged ratio
//! over all keyed questions drives the severity level the report layer
//! uses for its messaging.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::difficulty::{sort_by_difficulty, QuestionDifficulty};
use crate::model::TopicMap;

/// Correct-rate cutoff below which a question triggers a recommendation.
pub const REMEDIAL_THRESHOLD: f64 = 50.0;

/// A remedial review suggestion for one underperforming question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Question identifier.
    pub question: String,
    /// Topic to review; synthesized from the question identifier when no
    /// mapping is available.
    pub topic: String,
    /// The question's correct rate, 0–100.
    pub correct_rate: f64,
    /// Advisory text for the report.
    pub advice: String,
}

/// Produce recommendations for every question below `threshold`, in
/// ascending correct-rate order (ties by original question order).
///
/// A question missing from `topics` gets the fallback label
/// `Topic for <question>` — a degraded label, not an error.
pub fn recommend(
    difficulty: &HashMap<String, QuestionDifficulty>,
    questions: &[String],
    topics: Option<&TopicMap>,
    threshold: f64,
) -> Vec<Recommendation> {
    sort_by_difficulty(difficulty, questions)
        .into_iter()
        .filter(|d| d.correct_rate < threshold)
        .map(|d| {
            let topic = match topics.and_then(|t| t.get(&d.question)) {
                Some(topic) => topic.to_string(),
                None => {
                    if topics.is_some() {
                        tracing::warn!(
                            question = %d.question,
                            "no topic mapped; using fallback label"
                        );
                    }
                    format!("Topic for {}", d.question)
                }
            };

            Recommendation {
                advice: format!("Review recommended for topic '{topic}'"),
                question: d.question,
                correct_rate: d.correct_rate,
                topic,
            }
        })
        .collect()
}

/// How much of the exam needs remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemediationSeverity {
    /// No questions flagged.
    None,
    /// Up to 30% of questions flagged.
    LightEmphasis,
    /// Over 30% of questions flagged.
    Targeted,
    /// Over half of all questions flagged.
    Comprehensive,
}

impl RemediationSeverity {
    /// Advisory message shown alongside the recommendation table.
    pub fn message(&self) -> &'static str {
        match self {
            RemediationSeverity::None => {
                "All questions show healthy success rates. Proceed to the next unit."
            }
            RemediationSeverity::LightEmphasis => {
                "A few questions show low success rates. Give those topics extra emphasis in the next session."
            }
            RemediationSeverity::Targeted => {
                "A significant share of questions show low success rates. Focus remediation on the topics identified."
            }
            RemediationSeverity::Comprehensive => {
                "Most questions show low success rates. A comprehensive remediation of this material is advised."
            }
        }
    }
}

impl fmt::Display for RemediationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemediationSeverity::None => write!(f, "none"),
            RemediationSeverity::LightEmphasis => write!(f, "light emphasis"),
            RemediationSeverity::Targeted => write!(f, "targeted"),
            RemediationSeverity::Comprehensive => write!(f, "comprehensive"),
        }
    }
}

/// Flagged-question ratio and its severity classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationSummary {
    /// Questions below the remedial threshold.
    pub flagged: usize,
    /// Total keyed questions.
    pub total_questions: usize,
    /// flagged / total_questions * 100.
    pub flagged_ratio: f64,
    /// Severity band the ratio falls into.
    pub severity: RemediationSeverity,
}

/// Compute the remediation summary for a run.
pub fn remediation_summary(flagged: usize, total_questions: usize) -> RemediationSummary {
    let flagged_ratio = if total_questions == 0 {
        0.0
    } else {
        flagged as f64 / total_questions as f64 * 100.0
    };

    let severity = if flagged_ratio > 50.0 {
        RemediationSeverity::Comprehensive
    } else if flagged_ratio > 30.0 {
        RemediationSeverity::Targeted
    } else if flagged_ratio > 0.0 {
        RemediationSeverity::LightEmphasis
    } else {
        RemediationSeverity::None
    };

    RemediationSummary {
        flagged,
        total_questions,
        flagged_ratio,
        severity,
    }
}
