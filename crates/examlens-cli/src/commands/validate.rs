//! The `examlens validate` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::load_config_from;

pub fn execute(
    input: PathBuf,
    identifier_column: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let identifier_column = identifier_column.unwrap_or(config.identifier_column);

    let table = examlens_core::parser::parse_table(&input)?;
    println!(
        "Table: {} ({} rows, {} columns)",
        input.display(),
        table.len(),
        table.columns.len()
    );

    let warnings = examlens_core::parser::validate_table(&table, &identifier_column);
    for w in &warnings {
        let prefix = w
            .row
            .map(|r| format!("  [row {r}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("No issues found.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
