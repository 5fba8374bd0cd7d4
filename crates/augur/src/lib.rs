//! Augur: semantic type inference for tabular datasets.
//!
//! Augur reads a delimited-text or spreadsheet file whose columns are
//! untyped strings, normalizes null-like tokens, and assigns each column a
//! best-guess semantic type by running a fixed-order chain of detectors:
//! Boolean → Complex → Numeric → Datetime → Timedelta, with a
//! categorical/text fallback that always terminates the chain.
//!
//! # Core Principles
//!
//! - **Lossy per value, never per column**: a value that fails to parse in
//!   a claimed column becomes null; it never rejects the column.
//! - **Deterministic**: the sampling step behind datetime detection is
//!   seeded, so identical input always classifies identically.
//! - **Self-contained**: one synchronous pass, whole file in memory, no
//!   state shared between runs.
//!
//! # Example
//!
//! ```no_run
//! use augur::Augur;
//!
//! let augur = Augur::new();
//! let result = augur.infer("data.csv").unwrap();
//!
//! for (column, semantic_type) in &result.types {
//!     println!("{column}: {semantic_type}");
//! }
//! println!("{} rows in {:.3}s", result.row_count, result.processing_time);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod schema;
pub mod serialize;

mod augur;

pub use crate::augur::{Augur, AugurConfig, InferenceResult};
pub use error::{AugurError, Result};
pub use input::{RawTable, Reader, ReaderConfig, SourceMetadata};
pub use schema::{CellValue, CleanedColumn, Complex, InferredColumn, SemanticType};
