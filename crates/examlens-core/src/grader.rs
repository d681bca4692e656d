//! Per-student grading against the answer key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::{AnswerKey, ResponseTable};

/// One student's graded responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedRow {
    /// Student identifier (not necessarily unique).
    pub identifier: String,
    /// Question identifier -> whether the response matched the key.
    pub correctness: HashMap<String, bool>,
    /// Count of correct responses.
    pub total_correct: u32,
    /// Percentage score: total_correct / keyed questions * 100. Unrounded;
    /// rounding is a presentation concern.
    pub score: f64,
}

/// Grade every row of `table` against `key`.
///
/// Correctness is exact equality on the trimmed response token —
/// case-sensitive, whitespace-insensitive at the ends. A missing or blank
/// cell for a keyed question counts as incorrect, never as an error; only
/// a keyed question with no matching column at all fails, with
/// [`AnalysisError::Schema`].
pub fn grade(
    table: &ResponseTable,
    key: &AnswerKey,
    identifier_column: &str,
) -> Result<Vec<GradedRow>, AnalysisError> {
    let id_col = table.column_index(identifier_column).ok_or_else(|| {
        AnalysisError::Schema(format!(
            "identifier column '{identifier_column}' not found in response table"
        ))
    })?;

    if key.is_empty() {
        return Err(AnalysisError::Configuration(
            "answer key has no questions".into(),
        ));
    }

    // Resolve keyed question columns up front so a schema mismatch fails
    // before any row is graded.
    let mut question_cols = Vec::with_capacity(key.len());
    for q in &key.questions {
        let col = table.column_index(q).ok_or_else(|| {
            AnalysisError::Schema(format!(
                "keyed question '{q}' has no column in the response table"
            ))
        })?;
        question_cols.push((q.as_str(), col));
    }

    let total_questions = key.len() as f64;

    let graded = table
        .rows
        .iter()
        .map(|row| {
            let mut correctness = HashMap::with_capacity(key.len());
            let mut total_correct = 0u32;

            for &(q, col) in &question_cols {
                let response = row[col].trim();
                let correct =
                    !response.is_empty() && key.answer_for(q) == Some(response);
                if correct {
                    total_correct += 1;
                }
                correctness.insert(q.to_string(), correct);
            }

            GradedRow {
                identifier: row[id_col].trim().to_string(),
                correctness,
                total_correct,
                score: total_correct as f64 / total_questions * 100.0,
            }
        })
        .collect();

    Ok(graded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> AnswerKey {
        AnswerKey::new(vec![("Q1".into(), "A".into()), ("Q2".into(), "B".into())])
    }

    fn table(rows: Vec<Vec<&str>>) -> ResponseTable {
        ResponseTable::new(
            vec!["Name".into(), "Q1".into(), "Q2".into()],
            rows.into_iter()
                .map(|r| r.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }

    #[test]
    fn half_correct_scores_fifty() {
        // One student answers Q1 correctly and Q2 incorrectly
        let graded = grade(&table(vec![vec!["Alice", "A", "C"]]), &key(), "Name").unwrap();
        assert_eq!(graded.len(), 1);
        assert_eq!(graded[0].identifier, "Alice");
        assert_eq!(graded[0].total_correct, 1);
        assert!((graded[0].score - 50.0).abs() < f64::EPSILON);
        assert!(graded[0].correctness["Q1"]);
        assert!(!graded[0].correctness["Q2"]);
    }

    #[test]
    fn one_graded_row_per_student() {
        let graded = grade(
            &table(vec![
                vec!["Alice", "A", "B"],
                vec!["Bob", "B", "B"],
                vec!["Cara", "", ""],
            ]),
            &key(),
            "Name",
        )
        .unwrap();
        assert_eq!(graded.len(), 3);
        assert_eq!(graded[0].score, 100.0);
        assert_eq!(graded[1].total_correct, 1);
        assert_eq!(graded[2].total_correct, 0);
    }

    #[test]
    fn comparison_trims_whitespace() {
        let graded = grade(&table(vec![vec!["Alice", " A ", "B "]]), &key(), "Name").unwrap();
        assert_eq!(graded[0].total_correct, 2);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let graded = grade(&table(vec![vec!["Alice", "a", "b"]]), &key(), "Name").unwrap();
        assert_eq!(graded[0].total_correct, 0);
    }

    #[test]
    fn missing_cells_count_as_incorrect() {
        let graded = grade(&table(vec![vec!["Alice", "A"]]), &key(), "Name").unwrap();
        assert_eq!(graded[0].total_correct, 1);
        assert!(!graded[0].correctness["Q2"]);
    }

    #[test]
    fn extra_table_columns_are_ignored() {
        let table = ResponseTable::new(
            vec!["Name".into(), "Q1".into(), "Q2".into(), "Notes".into()],
            vec![vec!["Alice".into(), "A".into(), "B".into(), "late".into()]],
        );
        let graded = grade(&table, &key(), "Name").unwrap();
        assert_eq!(graded[0].correctness.len(), 2);
        assert_eq!(graded[0].score, 100.0);
    }

    #[test]
    fn keyed_question_without_column_is_schema_error() {
        let key = AnswerKey::new(vec![("Q1".into(), "A".into()), ("Q9".into(), "D".into())]);
        let err = grade(&table(vec![vec!["Alice", "A", "B"]]), &key, "Name").unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
        assert!(err.to_string().contains("Q9"));
    }

    #[test]
    fn empty_key_is_configuration_error() {
        let key = AnswerKey::new(vec![]);
        let err = grade(&table(vec![vec!["Alice", "A", "B"]]), &key, "Name").unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }

    #[test]
    fn zero_rows_grade_to_zero_entries() {
        let graded = grade(&table(vec![]), &key(), "Name").unwrap();
        assert!(graded.is_empty());
    }

    #[test]
    fn grading_is_deterministic() {
        let t = table(vec![vec!["Alice", "A", "C"], vec!["Bob", "B", "B"]]);
        let first = grade(&t, &key(), "Name").unwrap();
        let second = grade(&t, &key(), "Name").unwrap();
        assert_eq!(first, second);
    }
}
