//! Cell value extraction helpers.
//!
//! Schema inference may type any primary-table column as numeric or
//! boolean, so cell access goes through `AnyValue` conversions instead
//! of assuming string columns.

use polars::prelude::*;

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "Y" } else { "N" }.to_string(),
        other => other.to_string(),
    }
}

/// Converts AnyValue to a trimmed String, returning None if the result
/// is empty.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        // Integral values print without a decimal point; trimming would
        // eat real digits ("50" -> "5").
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null_is_empty() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_formats_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(50.0)), "50");
        assert_eq!(any_to_string(AnyValue::Float64(49.75)), "49.75");
        assert_eq!(any_to_string(AnyValue::Int64(12)), "12");
    }

    #[test]
    fn test_any_to_string_non_empty_trims() {
        assert_eq!(
            any_to_string_non_empty(AnyValue::String("  red  ")),
            Some("red".to_string())
        );
        assert_eq!(any_to_string_non_empty(AnyValue::String("   ")), None);
        assert_eq!(any_to_string_non_empty(AnyValue::Null), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("49.8"), Some(49.8));
        assert_eq!(parse_f64(" 15.5 "), Some(15.5));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("abc"), None);
    }
}
