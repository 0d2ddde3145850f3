//! Lenient form-input coercion.
//!
//! Form fields arrive as free text. Anything that is not a number turns
//! into zero before it reaches the estimation engine, which never sees
//! malformed input.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

fn decimal_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
    })
}

fn integer_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[+-]?\d+").unwrap()
    })
}

/// Parse the leading decimal number of `raw`; unparsable input becomes 0.
///
/// `"3.5 m"` → 3.5, `"abc"` → 0.0, `""` → 0.0.
pub fn coerce_f64(raw: &str) -> f64 {
    decimal_prefix()
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse the leading integer of `raw`; unparsable or negative input becomes 0.
///
/// `"40.7"` → 40, `"-3"` → 0.
pub fn coerce_count(raw: &str) -> u64 {
    integer_prefix()
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map_or(0, |v| u64::try_from(v).unwrap_or(0))
}

/// A form value as sent by a client: either a JSON number or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Number(_) => 0.0,
            Self::Text(s) => coerce_f64(s),
        }
    }

    pub fn as_count(&self) -> u64 {
        match self {
            // Truncates toward zero like an integer form field
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Self::Number(n) if n.is_finite() && *n > 0.0 => n.trunc() as u64,
            Self::Number(_) => 0,
            Self::Text(s) => coerce_count(s),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_f64_plain_numbers() {
        assert_eq!(coerce_f64("3.5"), 3.5);
        assert_eq!(coerce_f64("  -2"), -2.0);
        assert_eq!(coerce_f64(".5"), 0.5);
        assert_eq!(coerce_f64("1e2"), 100.0);
    }

    #[test]
    fn test_coerce_f64_trailing_garbage() {
        assert_eq!(coerce_f64("3.5m"), 3.5);
        assert_eq!(coerce_f64("12,5"), 12.0);
    }

    #[test]
    fn test_coerce_f64_invalid_is_zero() {
        assert_eq!(coerce_f64(""), 0.0);
        assert_eq!(coerce_f64("abc"), 0.0);
        assert_eq!(coerce_f64("NaN"), 0.0);
        assert_eq!(coerce_f64("-"), 0.0);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("40"), 40);
        assert_eq!(coerce_count("40.9"), 40);
        assert_eq!(coerce_count("-3"), 0);
        assert_eq!(coerce_count("x1"), 0);
    }

    #[test]
    fn test_field_value_untagged_json() {
        let n: FieldValue = serde_json::from_str("3.5").unwrap();
        let s: FieldValue = serde_json::from_str("\"4.25 m\"").unwrap();
        assert_eq!(n.as_f64(), 3.5);
        assert_eq!(s.as_f64(), 4.25);
        assert_eq!(FieldValue::from("oops").as_f64(), 0.0);
        assert_eq!(FieldValue::Number(39.9).as_count(), 39);
    }
}
