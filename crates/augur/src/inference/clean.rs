//! Null-token normalization applied to every column before detection.

use crate::schema::CleanedColumn;

/// Tokens rewritten to null. Matching is case-sensitive on the trimmed cell;
/// `"none"` or `"NULL"` survive as ordinary text.
pub const NULL_TOKENS: [&str; 6] = [
    "None",
    "NaN",
    "null",
    "Null",
    "not available",
    "Not Available",
];

/// Normalize one column: trim every cell, rewrite null-like tokens and
/// blank cells to null, keep everything else as its trimmed text.
pub fn clean_column<'a>(
    name: &str,
    cells: impl Iterator<Item = Option<&'a str>>,
) -> CleanedColumn {
    let cleaned = cells
        .map(|cell| {
            let trimmed = cell?.trim();
            if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect();

    CleanedColumn::new(name, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(cells: &[Option<&str>]) -> Vec<Option<String>> {
        clean_column("c", cells.iter().copied()).cells
    }

    #[test]
    fn test_null_tokens_become_null() {
        let out = clean(&[
            Some("None"),
            Some("NaN"),
            Some("null"),
            Some("Null"),
            Some("not available"),
            Some("Not Available"),
        ]);
        assert!(out.iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let out = clean(&[Some("none"), Some("NULL"), Some("nan")]);
        assert_eq!(
            out,
            vec![
                Some("none".to_string()),
                Some("NULL".to_string()),
                Some("nan".to_string())
            ]
        );
    }

    #[test]
    fn test_cells_are_trimmed() {
        let out = clean(&[Some("  hello "), Some(" None "), Some("   ")]);
        assert_eq!(out, vec![Some("hello".to_string()), None, None]);
    }

    #[test]
    fn test_nulls_stay_null() {
        let out = clean(&[None, Some("x")]);
        assert_eq!(out, vec![None, Some("x".to_string())]);
    }
}
