//! The `examlens init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create examlens.toml
    if std::path::Path::new("examlens.toml").exists() {
        println!("examlens.toml already exists, skipping.");
    } else {
        std::fs::write("examlens.toml", SAMPLE_CONFIG)?;
        println!("Created examlens.toml");
    }

    // Create sample data
    std::fs::create_dir_all("sample-data")?;

    let exam_path = std::path::Path::new("sample-data/exam.csv");
    if exam_path.exists() {
        println!("sample-data/exam.csv already exists, skipping.");
    } else {
        std::fs::write(exam_path, SAMPLE_EXAM)?;
        println!("Created sample-data/exam.csv");
    }

    let topics_path = std::path::Path::new("sample-data/topics.toml");
    if topics_path.exists() {
        println!("sample-data/topics.toml already exists, skipping.");
    } else {
        std::fs::write(topics_path, SAMPLE_TOPICS)?;
        println!("Created sample-data/topics.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: examlens validate --input sample-data/exam.csv");
    println!(
        "  2. Run: examlens analyze --input sample-data/exam.csv --key-in-first-row --topics sample-data/topics.toml"
    );
    println!("  3. Replace the sample data with your own exam results");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examlens configuration

# Column holding student identifiers
identifier_column = "Name"

# Score threshold for the pass/fail status column
pass_threshold = 70.0

# Optional question -> topic mapping for remedial recommendations
# topics = "sample-data/topics.toml"
"#;

// The first data row is the answer key.
const SAMPLE_EXAM: &str = "\
Name,Q1,Q2,Q3,Q4,Q5
KEY,A,B,C,A,D
Student 1,A,B,C,D,D
Student 2,B,B,A,A,D
Student 3,A,A,C,A,C
Student 4,C,B,B,A,D
Student 5,A,C,C,B,D
";

const SAMPLE_TOPICS: &str = r#"# Topics reviewed when a question underperforms

[topics]
Q1 = "Linear equations"
Q2 = "Fractions"
Q3 = "Geometry"
Q4 = "Ratios"
Q5 = "Percentages"
"#;
