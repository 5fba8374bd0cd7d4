//! Main Augur engine and public API.

use std::path::Path;
use std::time::Instant;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AugurError, Result};
use crate::inference::{clean_column, run_chain};
use crate::input::{RawTable, Reader, ReaderConfig, SourceMetadata};
use crate::schema::{InferredColumn, SemanticType};
use crate::serialize::cell_to_json;

/// Configuration for an inference run.
#[derive(Debug, Clone)]
pub struct AugurConfig {
    /// Reader configuration.
    pub reader: ReaderConfig,
    /// Maximum values sampled per column for datetime detection.
    pub sample_size: usize,
    /// Seed for the datetime detection sample. Fixed so repeated runs on
    /// identical input make identical classification decisions.
    pub sample_seed: u64,
    /// Number of leading rows rendered into the preview sample.
    pub sample_rows: usize,
}

impl Default for AugurConfig {
    fn default() -> Self {
        Self {
            reader: ReaderConfig::default(),
            sample_size: 1000,
            sample_seed: 1,
            sample_rows: 5,
        }
    }
}

/// Result of inferring types for a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Inferred type per column, in original column order.
    pub types: IndexMap<String, SemanticType>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Wall-clock seconds spent reading and inferring.
    pub processing_time: f64,
    /// Leading rows rendered as JSON-safe values for preview.
    pub sample: Vec<IndexMap<String, Value>>,
    /// User overrides layered over the inferred types on demand.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    overrides: IndexMap<String, String>,
}

impl InferenceResult {
    /// The effective type mapping: inferred types with overrides replacing
    /// the entries they name. Computed on demand; the inferred map is never
    /// touched.
    pub fn effective_types(&self) -> IndexMap<String, String> {
        let mut effective: IndexMap<String, String> = self
            .types
            .iter()
            .map(|(name, ty)| (name.clone(), ty.as_str().to_string()))
            .collect();
        for (name, ty) in &self.overrides {
            effective.insert(name.clone(), ty.clone());
        }
        effective
    }

    /// Replace the effective type of one column and return the updated
    /// mapping. The override must name an inferred column and carry a
    /// non-blank type; otherwise nothing changes and an error is returned.
    pub fn apply_override(
        &mut self,
        column: &str,
        new_type: &str,
    ) -> Result<IndexMap<String, String>> {
        if !self.types.contains_key(column) {
            return Err(AugurError::ColumnNotFound(column.to_string()));
        }
        let trimmed = new_type.trim();
        if trimmed.is_empty() {
            return Err(AugurError::InvalidOverrideType(new_type.to_string()));
        }

        self.overrides
            .insert(column.to_string(), trimmed.to_string());
        Ok(self.effective_types())
    }

    /// Overrides applied so far.
    pub fn overrides(&self) -> &IndexMap<String, String> {
        &self.overrides
    }
}

/// The inference engine: reads a tabular file, classifies every column, and
/// assembles a typed preview.
pub struct Augur {
    config: AugurConfig,
    reader: Reader,
}

impl Augur {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(AugurConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: AugurConfig) -> Self {
        let reader = Reader::with_config(config.reader.clone());
        Self { config, reader }
    }

    /// Infer a type for every column of the file at `path`.
    ///
    /// Columns are processed independently: normalize null tokens, run the
    /// detector chain, fall back to categorical/text. Elapsed time covers
    /// the read and all column inference.
    pub fn infer(&self, path: impl AsRef<Path>) -> Result<InferenceResult> {
        let started = Instant::now();

        let (table, source) = self.reader.read_file(path.as_ref())?;

        let mut types: IndexMap<String, SemanticType> =
            IndexMap::with_capacity(table.column_count());
        let mut columns: Vec<InferredColumn> = Vec::with_capacity(table.column_count());

        for (index, name) in table.headers.iter().enumerate() {
            let cleaned = clean_column(name, table.column_values(index));
            let inferred = run_chain(&cleaned, self.config.sample_size, self.config.sample_seed);
            debug!(column = %name, semantic_type = %inferred.semantic_type, "column classified");
            types.insert(name.clone(), inferred.semantic_type);
            columns.push(inferred);
        }

        let sample = build_sample(&table, &columns, self.config.sample_rows);
        let processing_time = started.elapsed().as_secs_f64();

        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            elapsed_secs = processing_time,
            "inference complete"
        );

        Ok(InferenceResult {
            row_count: table.row_count(),
            column_count: table.column_count(),
            source,
            types,
            processing_time,
            sample,
            overrides: IndexMap::new(),
        })
    }
}

impl Default for Augur {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the first `limit` rows through the serializer, keyed by column
/// name in original order.
fn build_sample(
    table: &RawTable,
    columns: &[InferredColumn],
    limit: usize,
) -> Vec<IndexMap<String, Value>> {
    let count = limit.min(table.row_count());
    (0..count)
        .map(|row| {
            columns
                .iter()
                .map(|col| (col.name.clone(), cell_to_json(col.values[row].as_ref())))
                .collect()
        })
        .collect()
}
