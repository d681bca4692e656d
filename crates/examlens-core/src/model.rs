//! Core data model types for examlens.
//!
//! These are the fundamental types the analysis pipeline operates on:
//! response tables, answer keys, and the key-source selector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A tabular set of exam responses: named columns, one row per student.
///
/// One column (caller-designated) holds the student identifier; every other
/// column is a question identifier, in column order. Rows are stored
/// row-major and always have exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTable {
    /// Column names in display order.
    pub columns: Vec<String>,
    /// Row-major cell values, one inner vec per student row.
    pub rows: Vec<Vec<String>>,
}

impl ResponseTable {
    /// Build a table, padding short rows and truncating long ones so every
    /// row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All columns except the identifier column, in column order.
    pub fn question_columns(&self, identifier_column: &str) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.as_str() != identifier_column)
            .cloned()
            .collect()
    }

    /// Cell value at (row index, column name), if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The canonical answer key: one correct response token per question.
///
/// Question order is preserved from the source table so downstream
/// tie-breaking stays deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKey {
    /// Question identifiers in original column order.
    pub questions: Vec<String>,
    /// Question identifier -> correct response token (trimmed).
    pub answers: HashMap<String, String>,
}

impl AnswerKey {
    /// Build a key from ordered (question, answer) pairs. Answers are
    /// trimmed; comparison elsewhere is on trimmed tokens.
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let questions = entries.iter().map(|(q, _)| q.clone()).collect();
        let answers = entries
            .into_iter()
            .map(|(q, a)| (q, a.trim().to_string()))
            .collect();
        Self { questions, answers }
    }

    /// The correct response token for a question, if keyed.
    pub fn answer_for(&self, question: &str) -> Option<&str> {
        self.answers.get(question).map(String::as_str)
    }

    /// Number of keyed questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True if the key holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Where the answer key comes from, resolved once at the start of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// The first row of the response table is the key; remaining rows are
    /// the student set.
    FirstRow,
    /// A separate table with the same question columns; the key is read
    /// from its first data row.
    External(ResponseTable),
}

/// Optional mapping from question identifier to a human-readable topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicMap {
    topics: HashMap<String, String>,
}

impl TopicMap {
    pub fn new(topics: HashMap<String, String>) -> Self {
        Self { topics }
    }

    /// Topic for a question, if mapped.
    pub fn get(&self, question: &str) -> Option<&str> {
        self.topics.get(question).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResponseTable {
        ResponseTable::new(
            vec!["Name".into(), "Q1".into(), "Q2".into()],
            vec![
                vec!["Alice".into(), "A".into(), "B".into()],
                vec!["Bob".into(), "C".into()],
            ],
        )
    }

    #[test]
    fn short_rows_are_padded() {
        let t = table();
        assert_eq!(t.cell(1, "Q2"), Some(""));
    }

    #[test]
    fn column_lookup() {
        let t = table();
        assert_eq!(t.column_index("Q1"), Some(1));
        assert_eq!(t.column_index("missing"), None);
        assert_eq!(t.question_columns("Name"), vec!["Q1", "Q2"]);
    }

    #[test]
    fn answer_key_trims_tokens() {
        let key = AnswerKey::new(vec![("Q1".into(), " A ".into()), ("Q2".into(), "B".into())]);
        assert_eq!(key.answer_for("Q1"), Some("A"));
        assert_eq!(key.len(), 2);
        assert_eq!(key.answer_for("Q3"), None);
    }

    #[test]
    fn table_serde_roundtrip() {
        let t = table();
        let json = serde_json::to_string(&t).unwrap();
        let back: ResponseTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
