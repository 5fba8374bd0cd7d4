//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Augur: semantic type inference for tabular files
#[derive(Parser)]
#[command(name = "augur")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer a semantic type for every column of a data file
    Infer {
        /// Path to the data file (CSV/TSV/XLSX/XLS)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Values sampled per column for datetime detection
        #[arg(long, default_value = "1000")]
        sample_size: usize,

        /// Number of preview rows to render
        #[arg(long, default_value = "5")]
        rows: usize,

        /// Output the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the semantic types the engine can assign
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
