//! Schema types for representing inferred column structure.

mod column;
mod types;

pub use column::{CellValue, CleanedColumn, InferredColumn};
pub use types::{Complex, SemanticType};
