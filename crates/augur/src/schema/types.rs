//! Core type definitions for inferred column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred semantic type for a column.
///
/// The variants are ordered the way the detector chain tries them; the last
/// two are the terminal fallback pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// True/false values.
    Boolean,
    /// Complex numbers (real + imaginary part).
    Complex,
    /// Whole numbers (no decimal point, no missing values).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Date and/or time values.
    Datetime,
    /// Time intervals.
    Timedelta,
    /// Low-cardinality string values.
    Categorical,
    /// Free text.
    Text,
}

impl SemanticType {
    /// Stable internal name, used as the value in effective-type mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "boolean",
            SemanticType::Complex => "complex",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::Datetime => "datetime",
            SemanticType::Timedelta => "timedelta",
            SemanticType::Categorical => "categorical",
            SemanticType::Text => "text",
        }
    }

    /// Human-readable name for display surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "Boolean",
            SemanticType::Complex => "Complex Number",
            SemanticType::Integer => "Integer",
            SemanticType::Float => "Float",
            SemanticType::Datetime => "Date/Time",
            SemanticType::Timedelta => "Time Interval",
            SemanticType::Categorical => "Category",
            SemanticType::Text => "Text",
        }
    }

    /// Short description of what the type holds.
    pub fn description(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "True/False values",
            SemanticType::Complex => "Complex numbers",
            SemanticType::Integer => "Whole numbers",
            SemanticType::Float => "Floating point numbers",
            SemanticType::Datetime => "Date and time data",
            SemanticType::Timedelta => "Time intervals",
            SemanticType::Categorical => "Categorical data",
            SemanticType::Text => "Text data",
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Integer | SemanticType::Float | SemanticType::Complex
        )
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, SemanticType::Datetime | SemanticType::Timedelta)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complex number split into real and imaginary parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex {
    /// Renders in the conventional parenthesized form, e.g. `(3+4j)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "({}-{}j)", self.re, -self.im)
        } else {
            write!(f, "({}+{}j)", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_names_are_snake_case() {
        assert_eq!(SemanticType::Datetime.as_str(), "datetime");
        assert_eq!(SemanticType::Categorical.as_str(), "categorical");
        assert_eq!(
            serde_json::to_string(&SemanticType::Timedelta).unwrap(),
            "\"timedelta\""
        );
    }

    #[test]
    fn test_complex_display() {
        assert_eq!(Complex::new(3.0, 4.0).to_string(), "(3+4j)");
        assert_eq!(Complex::new(-1.5, -2.25).to_string(), "(-1.5-2.25j)");
        assert_eq!(Complex::new(0.0, 1.0).to_string(), "(0+1j)");
    }

    #[test]
    fn test_type_predicates() {
        assert!(SemanticType::Integer.is_numeric());
        assert!(SemanticType::Complex.is_numeric());
        assert!(SemanticType::Timedelta.is_temporal());
        assert!(!SemanticType::Text.is_numeric());
    }
}
