//! Answer key resolution.
//!
//! The key source is an explicit tagged variant resolved exactly once per
//! run: either the first row of the response table doubles as the key, or
//! a separate key table supplies it. Grading never has to branch on where
//! the key came from.

use crate::error::AnalysisError;
use crate::model::{AnswerKey, KeySource, ResponseTable};

/// Resolve the answer key and the working student table from a key source.
///
/// Returns the response table with any key row removed, plus the canonical
/// `AnswerKey`. Declines with a [`AnalysisError::Configuration`] error when
/// no usable key can be produced; analysis must not proceed on an empty
/// key.
pub fn resolve(
    table: &ResponseTable,
    source: &KeySource,
    identifier_column: &str,
) -> Result<(ResponseTable, AnswerKey), AnalysisError> {
    let id_col = table.column_index(identifier_column).ok_or_else(|| {
        AnalysisError::Schema(format!(
            "identifier column '{identifier_column}' not found in response table"
        ))
    })?;

    let questions = table.question_columns(identifier_column);
    if questions.is_empty() {
        return Err(AnalysisError::Configuration(
            "response table has no question columns; nothing to grade".into(),
        ));
    }

    match source {
        KeySource::FirstRow => {
            let Some(key_row) = table.rows.first() else {
                return Err(AnalysisError::Configuration(
                    "first row was designated as the key but the table has no rows".into(),
                ));
            };

            let entries = table
                .columns
                .iter()
                .enumerate()
                .filter(|(col, _)| *col != id_col)
                .map(|(col, name)| (name.clone(), key_row[col].clone()))
                .collect();

            let working = ResponseTable {
                columns: table.columns.clone(),
                rows: table.rows[1..].to_vec(),
            };

            Ok((working, AnswerKey::new(entries)))
        }

        KeySource::External(key_table) => {
            let Some(key_row_idx) = (!key_table.is_empty()).then_some(0) else {
                return Err(AnalysisError::Configuration(
                    "external key table has no data rows".into(),
                ));
            };

            if key_table.len() > 1 {
                tracing::warn!(
                    rows = key_table.len(),
                    "external key table has multiple rows; using the first"
                );
            }

            let entries = questions
                .iter()
                .map(|q| {
                    let answer = key_table.cell(key_row_idx, q).ok_or_else(|| {
                        AnalysisError::Schema(format!(
                            "question column '{q}' missing from external key table"
                        ))
                    })?;
                    Ok((q.clone(), answer.to_string()))
                })
                .collect::<Result<Vec<_>, AnalysisError>>()?;

            Ok((table.clone(), AnswerKey::new(entries)))
        }
    }
}
