//! Compiled pattern tables for date, interval, and complex-number detection.
//!
//! All patterns are compiled once on first use and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;

/// A date shape paired with the parse formats that can realize it.
pub struct DatePattern {
    pub regex: Regex,
    /// Candidate `chrono` format strings, tried in order.
    pub formats: &'static [&'static str],
}

/// Recognized date/time shapes, most specific first.
pub static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
    vec![
        DatePattern {
            regex: Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d+$").unwrap(),
            formats: &["%Y-%m-%d %H:%M:%S%.f"],
        },
        DatePattern {
            regex: Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap(),
            formats: &["%Y-%m-%d %H:%M:%S"],
        },
        DatePattern {
            regex: Regex::new(r"^\d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2}$").unwrap(),
            formats: &["%d-%m-%Y %H:%M:%S"],
        },
        DatePattern {
            regex: Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(),
            formats: &["%m/%d/%Y", "%d/%m/%Y"],
        },
        // Two-digit-year formats come first: `%y` consumes exactly two
        // digits and fails cleanly on four-digit years, while `%Y` would
        // happily swallow "23" as the year 23.
        DatePattern {
            regex: Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{2,4}$").unwrap(),
            formats: &[
                "%m/%d/%y", "%d/%m/%y", "%m-%d-%y", "%d-%m-%y", "%m/%d/%Y", "%d/%m/%Y",
                "%m-%d-%Y", "%d-%m-%Y",
            ],
        },
        DatePattern {
            regex: Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),
            formats: &["%Y-%m-%d"],
        },
    ]
});

/// Every format known to [`DATE_PATTERNS`], used as the strict fallback when
/// the shape-keyed fast path fails for a particular value.
pub static FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d",
    "%m/%d/%y",
    "%d/%m/%y",
    "%m-%d-%y",
    "%d-%m-%y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
];

/// Interval shapes accepted by the timedelta detector. Tested against the
/// trimmed, lower-cased value.
pub static TIMEDELTA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^-?\d+\s*days?$",
        r"^-?\d+\s*d$",
        r"^\d+:\d{2}(:\d{2})?(\.\d+)?$",
        r"^-?\d+\s*hours?$",
        r"^-?\d+\s*h$",
        r"^-?\d+\s*minutes?$",
        r"^-?\d+\s*m$",
        r"^-?\d+\s*seconds?$",
        r"^-?\d+\s*s$",
        r"^-?\d+\s*days?\s*[+-]?\s*\d{2}:\d{2}(:\d{2})?(\.\d+)?$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Full complex-number shape: signed real part, signed imaginary part,
/// trailing `j`, optional parentheses.
pub static COMPLEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?-?\d+(\.\d+)?[+-]\d+(\.\d+)?j\)?$").unwrap());

/// Capture groups for the real and signed imaginary parts.
pub static COMPLEX_CAPTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?(-?\d+(?:\.\d+)?)([+-]\d+(?:\.\d+)?)j\)?$").unwrap());

/// Signed day-count component of an interval string.
pub static TIMEDELTA_DAYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(-?\d+)\s*days?").unwrap());

/// Clock component of an interval string: `H:MM[:SS[.ffffff]]`.
pub static TIMEDELTA_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})(?::(\d{2}(?:\.\d+)?))?").unwrap());
