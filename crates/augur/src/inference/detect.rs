//! The cascading detector chain.
//!
//! Five single-responsibility detectors run in a fixed order per column:
//! Boolean → Complex → Numeric → Datetime → Timedelta. The first detector
//! that claims the column wins; columns nothing claims land in the
//! categorical/text fallback. Individual values that fail to parse inside a
//! claimed column degrade to null — a single bad cell never rejects the
//! column.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::patterns::{
    COMPLEX_CAPTURE, COMPLEX_PATTERN, DATE_PATTERNS, FALLBACK_DATE_FORMATS, TIMEDELTA_CLOCK,
    TIMEDELTA_DAYS, TIMEDELTA_PATTERNS,
};
use crate::schema::{CellValue, CleanedColumn, Complex, InferredColumn, SemanticType};

/// Run the full chain over one column. Always produces a typed column;
/// the categorical/text fallback is terminal.
pub fn run_chain(column: &CleanedColumn, sample_size: usize, seed: u64) -> InferredColumn {
    let datetime = |col: &CleanedColumn| detect_datetime(col, sample_size, seed);
    let detectors: [&dyn Fn(&CleanedColumn) -> Option<InferredColumn>; 5] = [
        &detect_boolean,
        &detect_complex,
        &detect_numeric,
        &datetime,
        &detect_timedelta,
    ];

    for detector in detectors {
        if let Some(inferred) = detector(column) {
            return inferred;
        }
    }

    categorical_fallback(column)
}

// =============================================================================
// BOOLEAN
// =============================================================================

/// Map a lower-cased token onto a boolean, if it is one.
fn bool_token(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "y" | "1" | "t" => Some(true),
        "false" | "no" | "n" | "0" | "f" => Some(false),
        _ => None,
    }
}

/// Claims the column when every non-null value (lower-cased) is a boolean
/// token. Requires at least one non-null value so all-null columns fall
/// through to the terminal fallback.
pub fn detect_boolean(column: &CleanedColumn) -> Option<InferredColumn> {
    let mut saw_value = false;
    for value in column.non_null() {
        saw_value = true;
        bool_token(&value.to_lowercase())?;
    }
    if !saw_value {
        return None;
    }

    let values = column
        .cells
        .iter()
        .map(|cell| {
            cell.as_deref()
                .and_then(|v| bool_token(&v.to_lowercase()))
                .map(CellValue::Bool)
        })
        .collect();

    Some(InferredColumn::new(
        column.name.clone(),
        SemanticType::Boolean,
        values,
    ))
}

// =============================================================================
// COMPLEX
// =============================================================================

/// Parse a complex-number string like `3+4j` or `(1.5-2.5j)`.
pub fn parse_complex(value: &str) -> Option<Complex> {
    let captures = COMPLEX_CAPTURE.captures(value)?;
    let re = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let im = captures.get(2)?.as_str().parse::<f64>().ok()?;
    Some(Complex::new(re, im))
}

/// Claims the column when at least one value parses as a complex number.
/// Non-matching values in a claimed column are nulled out. Lossy on purpose:
/// a column only partially complex still converts.
pub fn detect_complex(column: &CleanedColumn) -> Option<InferredColumn> {
    if !column.non_null().any(|v| COMPLEX_PATTERN.is_match(v)) {
        return None;
    }

    let values: Vec<Option<CellValue>> = column
        .cells
        .iter()
        .map(|cell| {
            cell.as_deref()
                .filter(|v| COMPLEX_PATTERN.is_match(v))
                .and_then(parse_complex)
                .map(CellValue::Complex)
        })
        .collect();

    if values.iter().all(|v| v.is_none()) {
        return None;
    }

    Some(InferredColumn::new(
        column.name.clone(),
        SemanticType::Complex,
        values,
    ))
}

// =============================================================================
// NUMERIC
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum ParsedNumber {
    Int(i64),
    Float(f64),
}

impl ParsedNumber {
    fn as_f64(self) -> f64 {
        match self {
            ParsedNumber::Int(i) => i as f64,
            ParsedNumber::Float(f) => f,
        }
    }

    /// The exact integer this number represents, when it is one.
    fn as_i64(self) -> Option<i64> {
        match self {
            ParsedNumber::Int(i) => Some(i),
            ParsedNumber::Float(f) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }
}

/// Per-value numeric coercion: integer fast path, then float (covers
/// scientific notation). Failure is `None`, never an error. A literal
/// `"nan"` coerces to nothing — it is a failed value, not a float.
fn parse_number(value: &str) -> Option<ParsedNumber> {
    if let Ok(i) = value.parse::<i64>() {
        return Some(ParsedNumber::Int(i));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| !f.is_nan())
        .map(ParsedNumber::Float)
}

/// Claims the column when at least one value coerces to a number.
///
/// The tag is `Integer` only when the typed column has no nulls at all —
/// no original nulls and no coercion failures — and every value is exactly
/// representable as `i64`. Anything else numeric is `Float`; a single blank
/// cell is enough to flip an otherwise-integer column.
pub fn detect_numeric(column: &CleanedColumn) -> Option<InferredColumn> {
    let parsed: Vec<Option<ParsedNumber>> = column
        .cells
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_number))
        .collect();

    if !parsed.iter().any(|p| p.is_some()) {
        return None;
    }

    let has_null = parsed.iter().any(|p| p.is_none());
    let all_integral = parsed
        .iter()
        .all(|p| p.and_then(ParsedNumber::as_i64).is_some());

    let (semantic_type, values) = if !has_null && all_integral {
        let values = parsed
            .iter()
            .map(|p| p.and_then(ParsedNumber::as_i64).map(CellValue::Int))
            .collect();
        (SemanticType::Integer, values)
    } else {
        let values = parsed
            .iter()
            .map(|p| p.map(|n| CellValue::Float(n.as_f64())))
            .collect();
        (SemanticType::Float, values)
    };

    Some(InferredColumn::new(
        column.name.clone(),
        semantic_type,
        values,
    ))
}

// =============================================================================
// DATETIME
// =============================================================================

/// Deterministic sample of `n` distinct indices out of `len`, via a seeded
/// partial Fisher-Yates shuffle. Repeated runs on the same data pick the
/// same sample.
fn sample_indices(len: usize, n: usize, seed: u64) -> Vec<usize> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..n {
        let j = rng.usize(i..len);
        indices.swap(i, j);
    }
    indices.truncate(n);
    indices
}

fn parse_with_format(value: &str, format: &str) -> Option<NaiveDateTime> {
    if format.contains("%H") {
        NaiveDateTime::parse_from_str(value, format).ok()
    } else {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

/// Parse a date/time string: fast path keyed to the first shape the value
/// matches, then the strict fallback over every known format.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Some(pattern) = DATE_PATTERNS.iter().find(|p| p.regex.is_match(value)) {
        for format in pattern.formats {
            if let Some(dt) = parse_with_format(value, format) {
                return Some(dt);
            }
        }
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|format| parse_with_format(value, format))
}

/// Sample-driven datetime detection. Draws up to `sample_size` non-null
/// values with a seeded PRNG and claims the column when the fraction
/// matching any date shape exceeds 0.5 strictly. On claim the entire column
/// is parsed; values neither parser understands become null.
pub fn detect_datetime(
    column: &CleanedColumn,
    sample_size: usize,
    seed: u64,
) -> Option<InferredColumn> {
    let non_null: Vec<&str> = column.non_null().collect();
    if non_null.is_empty() {
        return None;
    }

    let n = sample_size.min(non_null.len());
    let matched = sample_indices(non_null.len(), n, seed)
        .into_iter()
        .filter(|&i| DATE_PATTERNS.iter().any(|p| p.regex.is_match(non_null[i])))
        .count();

    if (matched as f64) / (n as f64) <= 0.5 {
        return None;
    }

    let values = column
        .cells
        .iter()
        .map(|cell| {
            cell.as_deref()
                .and_then(parse_datetime)
                .map(CellValue::Datetime)
        })
        .collect();

    Some(InferredColumn::new(
        column.name.clone(),
        SemanticType::Datetime,
        values,
    ))
}

// =============================================================================
// TIMEDELTA
// =============================================================================

/// Parse an interval string like `"-428 days +19:23:03.487674"`.
///
/// Extracts an optional signed day count and an optional clock component and
/// sums them; either missing component contributes zero. A value matching
/// neither therefore parses to a zero duration — unit-only forms like
/// `"5 hours"` pass detection but collapse here. That loss is intentional.
pub fn parse_timedelta(value: &str) -> Duration {
    let mut total = Duration::zero();

    if let Some(captures) = TIMEDELTA_DAYS.captures(value) {
        let days: i64 = captures[1].parse().unwrap_or(0);
        if let Some(d) = Duration::try_days(days) {
            total = total.checked_add(&d).unwrap_or(total);
        }
    }

    if let Some(captures) = TIMEDELTA_CLOCK.captures(value) {
        let hours: i64 = captures[1].parse().unwrap_or(0);
        let minutes: i64 = captures[2].parse().unwrap_or(0);
        let seconds: f64 = captures
            .get(3)
            .map(|m| m.as_str().parse().unwrap_or(0.0))
            .unwrap_or(0.0);
        let clock = Duration::hours(hours)
            + Duration::minutes(minutes)
            + Duration::microseconds((seconds * 1_000_000.0).round() as i64);
        total = total.checked_add(&clock).unwrap_or(total);
    }

    total
}

/// Claims the column when any non-null value (trimmed, lower-cased) matches
/// an interval shape. Every non-null value is then parsed; nulls stay null.
pub fn detect_timedelta(column: &CleanedColumn) -> Option<InferredColumn> {
    let any_match = column.non_null().any(|v| {
        let lowered = v.to_lowercase();
        TIMEDELTA_PATTERNS.iter().any(|p| p.is_match(&lowered))
    });
    if !any_match {
        return None;
    }

    let values = column
        .cells
        .iter()
        .map(|cell| {
            cell.as_deref()
                .map(|v| CellValue::Timedelta(parse_timedelta(v)))
        })
        .collect();

    Some(InferredColumn::new(
        column.name.clone(),
        SemanticType::Timedelta,
        values,
    ))
}

// =============================================================================
// CATEGORICAL / TEXT FALLBACK
// =============================================================================

/// Terminal classifier. `unique_ratio = distinct_non_null / rows`; below 0.5
/// the column is categorical, otherwise free text. An empty column has ratio
/// 0 and is categorical — never a division by zero.
pub fn categorical_fallback(column: &CleanedColumn) -> InferredColumn {
    let distinct: HashSet<&str> = column.non_null().collect();
    let unique_ratio = if column.is_empty() {
        0.0
    } else {
        distinct.len() as f64 / column.len() as f64
    };

    let semantic_type = if unique_ratio < 0.5 {
        SemanticType::Categorical
    } else {
        SemanticType::Text
    };

    let values = column
        .cells
        .iter()
        .map(|cell| cell.as_ref().map(|v| CellValue::Str(v.clone())))
        .collect();

    InferredColumn::new(column.name.clone(), semantic_type, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[Option<&str>]) -> CleanedColumn {
        CleanedColumn::new(
            "c",
            values.iter().map(|v| v.map(|s| s.to_string())).collect(),
        )
    }

    fn col_of(values: &[&str]) -> CleanedColumn {
        col(&values.iter().map(|v| Some(*v)).collect::<Vec<_>>())
    }

    // -------------------------------------------------------------------------
    // Boolean
    // -------------------------------------------------------------------------

    #[test]
    fn test_boolean_claims_mixed_case_tokens() {
        let inferred = detect_boolean(&col_of(&["TRUE", "no", "Y", "0", "t"])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Boolean);
        assert_eq!(
            inferred.values,
            vec![
                Some(CellValue::Bool(true)),
                Some(CellValue::Bool(false)),
                Some(CellValue::Bool(true)),
                Some(CellValue::Bool(false)),
                Some(CellValue::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_boolean_declines_on_single_outsider() {
        assert!(detect_boolean(&col_of(&["true", "false", "maybe"])).is_none());
    }

    #[test]
    fn test_boolean_keeps_nulls_null() {
        let inferred = detect_boolean(&col(&[Some("yes"), None])).unwrap();
        assert_eq!(inferred.values[1], None);
    }

    #[test]
    fn test_boolean_declines_all_null_column() {
        assert!(detect_boolean(&col(&[None, None])).is_none());
        assert!(detect_boolean(&col(&[])).is_none());
    }

    // -------------------------------------------------------------------------
    // Complex
    // -------------------------------------------------------------------------

    #[test]
    fn test_complex_parses_matching_values() {
        let inferred = detect_complex(&col_of(&["3+4j", "(1.5-2.5j)"])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Complex);
        assert_eq!(
            inferred.values[0],
            Some(CellValue::Complex(Complex::new(3.0, 4.0)))
        );
        assert_eq!(
            inferred.values[1],
            Some(CellValue::Complex(Complex::new(1.5, -2.5)))
        );
    }

    #[test]
    fn test_complex_nulls_out_partial_matches() {
        // Lossy on purpose: one complex value converts the column and the
        // stragglers are dropped to null.
        let inferred = detect_complex(&col_of(&["3+4j", "hello", "42"])).unwrap();
        assert_eq!(inferred.values[1], None);
        assert_eq!(inferred.values[2], None);
    }

    #[test]
    fn test_complex_declines_without_match() {
        assert!(detect_complex(&col_of(&["1", "2"])).is_none());
    }

    // -------------------------------------------------------------------------
    // Numeric
    // -------------------------------------------------------------------------

    #[test]
    fn test_numeric_all_whole_is_integer() {
        let inferred = detect_numeric(&col_of(&["1", "2", "300"])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Integer);
        assert_eq!(inferred.values[2], Some(CellValue::Int(300)));
    }

    #[test]
    fn test_numeric_null_flips_to_float() {
        let inferred = detect_numeric(&col(&[Some("1"), None, Some("3")])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Float);
        assert_eq!(inferred.values[0], Some(CellValue::Float(1.0)));
        assert_eq!(inferred.values[1], None);
    }

    #[test]
    fn test_numeric_coercion_failure_becomes_null_and_float() {
        let inferred = detect_numeric(&col_of(&["1", "oops", "3"])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Float);
        assert_eq!(inferred.values[1], None);
    }

    #[test]
    fn test_numeric_fractional_is_float() {
        let inferred = detect_numeric(&col_of(&["1.5", "2.5"])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Float);
    }

    #[test]
    fn test_numeric_whole_floats_stay_integer() {
        let inferred = detect_numeric(&col_of(&["1.0", "2e3"])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Integer);
        assert_eq!(inferred.values[1], Some(CellValue::Int(2000)));
    }

    #[test]
    fn test_numeric_declines_non_numeric() {
        assert!(detect_numeric(&col_of(&["a", "b"])).is_none());
    }

    // -------------------------------------------------------------------------
    // Datetime
    // -------------------------------------------------------------------------

    #[test]
    fn test_datetime_claims_above_half_matching() {
        // 3 of 5 values match a date shape: 0.6 > 0.5 claims.
        let inferred = detect_datetime(
            &col_of(&["2023-01-15", "2023-02-20", "2023-03-25", "x", "y"]),
            1000,
            1,
        )
        .unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Datetime);
        assert_eq!(inferred.values[3], None);
    }

    #[test]
    fn test_datetime_declines_at_or_below_half() {
        // 2 of 5: 0.4 <= 0.5 declines.
        assert!(detect_datetime(
            &col_of(&["2023-01-15", "2023-02-20", "a", "b", "c"]),
            1000,
            1
        )
        .is_none());
        // Exactly half also declines.
        assert!(detect_datetime(&col_of(&["2023-01-15", "a"]), 1000, 1).is_none());
    }

    #[test]
    fn test_datetime_parses_full_timestamp() {
        let inferred =
            detect_datetime(&col_of(&["2023-01-15 10:30:00", "2023-06-01 00:00:00"]), 1000, 1)
                .unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(inferred.values[0], Some(CellValue::Datetime(expected)));
    }

    #[test]
    fn test_parse_datetime_fractional_seconds() {
        let dt = parse_datetime("2023-01-15 10:30:00.123456").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string(), "2023-01-15 10:30:00.123456");
    }

    #[test]
    fn test_parse_datetime_slash_dates_month_first() {
        let dt = parse_datetime("02/03/2020").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2020, 2, 3).unwrap());
        // Impossible month-first falls back to day-first.
        let dt = parse_datetime("25/12/2020").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2020, 12, 25).unwrap());
    }

    #[test]
    fn test_datetime_sampling_is_deterministic() {
        let column = col_of(&[
            "2023-01-01", "2023-01-02", "2023-01-03", "nope", "also no", "2023-01-04",
        ]);
        let a = detect_datetime(&column, 3, 7).map(|c| c.semantic_type);
        let b = detect_datetime(&column, 3, 7).map(|c| c.semantic_type);
        assert_eq!(a, b);
    }

    // -------------------------------------------------------------------------
    // Timedelta
    // -------------------------------------------------------------------------

    #[test]
    fn test_timedelta_compound_form() {
        let d = parse_timedelta("-428 days +19:23:03.487674");
        let expected = Duration::days(-428)
            + Duration::hours(19)
            + Duration::minutes(23)
            + Duration::seconds(3)
            + Duration::microseconds(487674);
        assert_eq!(d, expected);
    }

    #[test]
    fn test_timedelta_day_and_clock_forms() {
        assert_eq!(parse_timedelta("3 days"), Duration::days(3));
        assert_eq!(parse_timedelta("-2 days"), Duration::days(-2));
        assert_eq!(
            parse_timedelta("12:30"),
            Duration::hours(12) + Duration::minutes(30)
        );
        assert_eq!(
            parse_timedelta("01:02:03"),
            Duration::hours(1) + Duration::minutes(2) + Duration::seconds(3)
        );
    }

    #[test]
    fn test_timedelta_unit_only_collapses_to_zero() {
        // "5 hours" passes detection but carries neither a day count nor a
        // clock component, so it parses to zero. Known lossy edge.
        assert_eq!(parse_timedelta("5 hours"), Duration::zero());
        assert_eq!(parse_timedelta("90 m"), Duration::zero());
    }

    #[test]
    fn test_timedelta_detector_claims_and_converts() {
        let inferred = detect_timedelta(&col(&[Some("3 days"), None, Some("12:30")])).unwrap();
        assert_eq!(inferred.semantic_type, SemanticType::Timedelta);
        assert_eq!(inferred.values[0], Some(CellValue::Timedelta(Duration::days(3))));
        assert_eq!(inferred.values[1], None);
    }

    #[test]
    fn test_timedelta_declines_without_match() {
        assert!(detect_timedelta(&col_of(&["soon", "later"])).is_none());
    }

    // -------------------------------------------------------------------------
    // Fallback
    // -------------------------------------------------------------------------

    #[test]
    fn test_fallback_categorical_below_half_unique() {
        // 10 rows, 4 distinct: ratio 0.4.
        let inferred = categorical_fallback(&col_of(&[
            "a", "b", "c", "d", "a", "b", "c", "d", "a", "b",
        ]));
        assert_eq!(inferred.semantic_type, SemanticType::Categorical);
    }

    #[test]
    fn test_fallback_text_at_or_above_half_unique() {
        // 10 rows, 6 distinct: ratio 0.6.
        let inferred = categorical_fallback(&col_of(&[
            "a", "b", "c", "d", "e", "f", "a", "b", "c", "d",
        ]));
        assert_eq!(inferred.semantic_type, SemanticType::Text);
    }

    #[test]
    fn test_fallback_empty_column_is_categorical() {
        let inferred = categorical_fallback(&col(&[]));
        assert_eq!(inferred.semantic_type, SemanticType::Categorical);
    }

    // -------------------------------------------------------------------------
    // Chain order
    // -------------------------------------------------------------------------

    #[test]
    fn test_chain_boolean_wins_over_numeric_for_zero_one() {
        // "1"/"0" are both boolean tokens and integers; boolean runs first.
        let inferred = run_chain(&col_of(&["1", "0", "1"]), 1000, 1);
        assert_eq!(inferred.semantic_type, SemanticType::Boolean);
    }

    #[test]
    fn test_chain_all_null_column_is_categorical() {
        let inferred = run_chain(&col(&[None, None, None]), 1000, 1);
        assert_eq!(inferred.semantic_type, SemanticType::Categorical);
    }

    #[test]
    fn test_chain_preserves_length_and_null_positions() {
        let column = col(&[Some("1"), None, Some("2")]);
        let inferred = run_chain(&column, 1000, 1);
        assert_eq!(inferred.values.len(), column.len());
        assert_eq!(inferred.values[1], None);
    }
}
