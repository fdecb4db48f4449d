//! Cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field contents treated as missing when loading (compared case-insensitively).
const NULL_TOKENS: &[&str] = &[
    "", "na", "n/a", "nan", "-nan", "null", "none", "<na>", "#n/a",
];

/// A single cell of a [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// No valid data. Distinct from zero and from the empty string.
    Missing,
    /// Numeric value, with the field text it was read from.
    Number { value: f64, raw: String },
    /// Text, kept exactly as read.
    Text(String),
}

impl Value {
    /// Classify a raw delimited field.
    ///
    /// Null tokens become [`Value::Missing`], anything whose trimmed form
    /// parses as a float becomes [`Value::Number`], the rest is kept verbatim
    /// as [`Value::Text`]. Numbers keep the raw field so they are written
    /// back exactly as read.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_null_token(trimmed) {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_nan() => Value::Number {
                value,
                raw: raw.to_string(),
            },
            _ => Value::Text(raw.to_string()),
        }
    }

    /// A number with no source text; renders in shortest form.
    pub fn number(value: f64) -> Self {
        Value::Number {
            value,
            raw: value.to_string(),
        }
    }

    /// Returns true for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric content, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Text content, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Missing => "missing",
            Value::Number { .. } => "number",
            Value::Text(_) => "text",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Missing
    }
}

impl fmt::Display for Value {
    /// Missing renders as the empty field, everything else as its text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number { raw, .. } => f.write_str(raw),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Check if a trimmed field represents a missing value.
pub fn is_null_token(field: &str) -> bool {
    NULL_TOKENS.iter().any(|t| field.eq_ignore_ascii_case(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_fields() {
        assert_eq!(Value::parse("5"), Value::from(5.0));
        assert_eq!(Value::parse(" -1.25 ").as_number(), Some(-1.25));
        assert_eq!(Value::parse(" Widget "), Value::Text(" Widget ".to_string()));
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("   "), Value::Missing);
    }

    #[test]
    fn test_null_tokens() {
        for token in ["NA", "na", "N/A", "NaN", "nan", "NULL", "null", "None", "<NA>", "#N/A"] {
            assert!(Value::parse(token).is_missing(), "{token} should be missing");
        }
        assert!(!Value::parse("0").is_missing());
        assert!(!Value::parse("value").is_missing());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(5.0).to_string(), "5");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::from(" x ").to_string(), " x ");
    }

    #[test]
    fn test_numbers_keep_source_text() {
        for raw in ["007", "5.50", "02134", "12345678901234567891", " 3 ", "1e3"] {
            let value = Value::parse(raw);
            assert_eq!(value.type_name(), "number");
            assert_eq!(value.to_string(), raw);
        }
        assert_eq!(Value::parse("5.50").as_number(), Some(5.5));
        assert_ne!(Value::parse("5.50"), Value::parse("5.5"));
    }
}
