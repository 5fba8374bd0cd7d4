//! Tabular file reader for delimited text and spreadsheet formats.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader as WorkbookReader};
use sha2::{Digest, Sha256};

use super::table::{RawTable, SourceMetadata};
use crate::error::{AugurError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Delimiter for text formats (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character for text formats.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files into a [`RawTable`].
///
/// The declared extension selects the parser: `csv`/`tsv`/`txt` go through
/// the delimited-text path, `xlsx`/`xls` through the spreadsheet path.
/// Anything else is an unsupported format.
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file and return the raw table and source metadata.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(RawTable, SourceMetadata)> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !matches!(extension.as_str(), "csv" | "tsv" | "txt" | "xlsx" | "xls") {
            return Err(AugurError::UnsupportedFormat(extension));
        }

        let contents = fs::read(path).map_err(|e| AugurError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());
        let size_bytes = contents.len() as u64;

        let (table, format) = match extension.as_str() {
            "csv" | "tsv" | "txt" => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents),
                };
                let table = self.parse_delimited(&contents, delimiter)?;
                let format = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                }
                .to_string();
                (table, format)
            }
            // Guarded above; only the spreadsheet extensions remain.
            _ => (read_workbook(path)?, extension.clone()),
        };

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse delimited bytes. An empty body is a valid, empty table.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() {
            return Ok(RawTable::empty());
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let mut row: Vec<Option<String>> = record.iter().map(text_cell).collect();

            // Pad short rows, truncate long ones, to header width.
            while row.len() < expected_cols {
                row.push(None);
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank delimited cells are nulls.
fn text_cell(field: &str) -> Option<String> {
    if field.trim().is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Read the first worksheet of a workbook. The first non-empty row of the
/// used range is the header; everything below it is data.
fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match workbook.sheet_names().first() {
        Some(name) => name.clone(),
        None => return Ok(RawTable::empty()),
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = loop {
        match rows_iter.next() {
            Some(row) if row.iter().any(|c| !matches!(c, Data::Empty)) => {
                break row.iter().map(header_cell).collect();
            }
            Some(_) => continue,
            None => return Ok(RawTable::empty()),
        }
    };

    let expected_cols = headers.len();
    let mut rows = Vec::new();
    for row in rows_iter {
        let mut cells: Vec<Option<String>> = row.iter().map(data_cell).collect();
        while cells.len() < expected_cols {
            cells.push(None);
        }
        cells.truncate(expected_cols);
        rows.push(cells);
    }

    Ok(RawTable::new(headers, rows))
}

/// Stringify a header cell. Integral floats lose the trailing `.0` so a
/// numeric header reads the way the author typed it.
fn header_cell(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

/// Stringify a data cell so it flows through the same detector chain as
/// delimited text. Empty and error cells are nulls.
fn data_cell(c: &Data) -> Option<String> {
    match c {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Some(naive.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Some(dt.to_string()),
        },
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Detect the delimiter by analyzing the first few lines. Falls back to a
/// comma when nothing scores.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return b',';
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts
                .iter()
                .map(|&c| (c as f64 - mean).powi(2))
                .sum::<f64>()
                / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins. Tab gets a slight bonus as
        // it is less common inside actual data values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
