//! CSV response table parser.
//!
//! Loads response and key tables from delimited text and checks them for
//! common data-entry problems before analysis.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::ResponseTable;

/// Parse a CSV file into a `ResponseTable`.
pub fn parse_table(path: &Path) -> Result<ResponseTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read table file: {}", path.display()))?;

    parse_table_str(&content, path)
}

/// Parse a CSV string into a `ResponseTable` (useful for testing).
///
/// The first record is the header. Short rows are padded with empty cells;
/// rows longer than the header are truncated with a warning.
pub fn parse_table_str(content: &str, source_path: &Path) -> Result<ResponseTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", source_path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        anyhow::bail!("no columns in table: {}", source_path.display());
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("failed to read CSV record {} in {}", i + 1, source_path.display())
        })?;

        if record.len() > columns.len() {
            tracing::warn!(
                row = i + 1,
                expected = columns.len(),
                found = record.len(),
                "row has more cells than the header; extras dropped"
            );
        }

        rows.push(record.iter().take(columns.len()).map(str::to_string).collect());
    }

    Ok(ResponseTable::new(columns, rows))
}

/// A warning from response table validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based data row the warning refers to (if applicable).
    pub row: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a response table for common issues.
///
/// None of these block analysis; they flag data likely to produce
/// surprising results (duplicate students, blank identifiers, blank
/// response cells).
pub fn validate_table(table: &ResponseTable, identifier_column: &str) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate column names make cell lookup ambiguous
    let mut seen_columns = std::collections::HashSet::new();
    for col in &table.columns {
        if !seen_columns.insert(col.as_str()) {
            warnings.push(ValidationWarning {
                row: None,
                message: format!("duplicate column: {col}"),
            });
        }
    }

    let Some(id_col) = table.column_index(identifier_column) else {
        warnings.push(ValidationWarning {
            row: None,
            message: format!("identifier column '{identifier_column}' not found"),
        });
        return warnings;
    };

    let mut seen_ids = std::collections::HashSet::new();
    for (i, row) in table.rows.iter().enumerate() {
        let id = row[id_col].trim();
        if id.is_empty() {
            warnings.push(ValidationWarning {
                row: Some(i + 1),
                message: "empty student identifier".into(),
            });
        } else if !seen_ids.insert(id.to_string()) {
            warnings.push(ValidationWarning {
                row: Some(i + 1),
                message: format!("duplicate student identifier: {id}"),
            });
        }

        let blank_cells = row
            .iter()
            .enumerate()
            .filter(|(c, v)| *c != id_col && v.trim().is_empty())
            .count();
        if blank_cells > 0 {
            warnings.push(ValidationWarning {
                row: Some(i + 1),
                message: format!("{blank_cells} blank response cell(s); graded as incorrect"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_CSV: &str = "\
Name,Q1,Q2,Q3
Alice,A,B,C
Bob,A,C,C
";

    #[test]
    fn parse_valid_csv() {
        let table = parse_table_str(VALID_CSV, &PathBuf::from("test.csv")).unwrap();
        assert_eq!(table.columns, vec!["Name", "Q1", "Q2", "Q3"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "Q2"), Some("B"));
        assert_eq!(table.cell(1, "Name"), Some("Bob"));
    }

    #[test]
    fn parse_pads_short_rows() {
        let csv = "Name,Q1,Q2\nAlice,A\n";
        let table = parse_table_str(csv, &PathBuf::from("test.csv")).unwrap();
        assert_eq!(table.cell(0, "Q2"), Some(""));
    }

    #[test]
    fn parse_truncates_long_rows() {
        let csv = "Name,Q1\nAlice,A,B,C\n";
        let table = parse_table_str(csv, &PathBuf::from("test.csv")).unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn parse_empty_input_fails() {
        let result = parse_table_str("", &PathBuf::from("empty.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_clean_table() {
        let table = parse_table_str(VALID_CSV, &PathBuf::from("test.csv")).unwrap();
        assert!(validate_table(&table, "Name").is_empty());
    }

    #[test]
    fn validate_duplicate_identifiers() {
        let csv = "Name,Q1\nAlice,A\nAlice,B\n";
        let table = parse_table_str(csv, &PathBuf::from("test.csv")).unwrap();
        let warnings = validate_table(&table, "Name");
        assert!(warnings.iter().any(|w| w.message.contains("duplicate student")));
        assert_eq!(warnings[0].row, Some(2));
    }

    #[test]
    fn validate_blank_cells_and_identifier() {
        let csv = "Name,Q1,Q2\n,A,\n";
        let table = parse_table_str(csv, &PathBuf::from("test.csv")).unwrap();
        let warnings = validate_table(&table, "Name");
        assert!(warnings.iter().any(|w| w.message.contains("empty student identifier")));
        assert!(warnings.iter().any(|w| w.message.contains("blank response cell")));
    }

    #[test]
    fn validate_missing_identifier_column() {
        let table = parse_table_str(VALID_CSV, &PathBuf::from("test.csv")).unwrap();
        let warnings = validate_table(&table, "Nama");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Nama"));
    }
}
