//! Infer command - classify every column of a data file.

use std::path::PathBuf;

use augur::{Augur, AugurConfig};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    sample_size: usize,
    rows: usize,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = AugurConfig {
        sample_size,
        sample_rows: rows,
        ..AugurConfig::default()
    };
    let augur = Augur::with_config(config);
    let result = augur.infer(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inferred".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "  {} columns, {} rows in {:.3}s",
        result.column_count, result.row_count, result.processing_time
    );

    println!();
    println!("{}", "Types:".yellow().bold());
    for (column, semantic_type) in &result.types {
        println!(
            "  {:24} {:12} {}",
            column,
            semantic_type.to_string().green(),
            if verbose {
                semantic_type.description()
            } else {
                ""
            }
        );
    }

    if !result.sample.is_empty() {
        println!();
        println!("{}", "Sample:".yellow().bold());
        for row in &result.sample {
            println!("  {}", serde_json::to_string(row)?);
        }
    }

    Ok(())
}
