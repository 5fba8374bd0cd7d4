//! Infer column types for a file and print the result.
//!
//! Usage: cargo run --example infer -- path/to/data.csv

use augur::Augur;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: infer <FILE.csv|FILE.tsv|FILE.xlsx>")?;

    let augur = Augur::new();
    let result = augur.infer(&path)?;

    println!(
        "{} columns, {} rows ({:.3}s)",
        result.column_count, result.row_count, result.processing_time
    );
    for (column, semantic_type) in &result.types {
        println!("  {:24} {}", column, semantic_type.display_name());
    }

    if !result.sample.is_empty() {
        println!("\nSample:");
        for row in &result.sample {
            println!("  {}", serde_json::to_string(row)?);
        }
    }

    Ok(())
}
