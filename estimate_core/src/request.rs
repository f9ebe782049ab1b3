//! # Estimate Requests
//!
//! Requests arrive from JSON bodies and command lines with loosely typed
//! fields. [`RawEstimateRequest`] holds them as received and
//! [`RawEstimateRequest::validate`] turns them into a typed
//! [`EstimateRequest`] or a structured error. Nothing here panics on bad
//! input.
//!
//! ## Coercion Rules
//!
//! | Input                     | `budget` / `size`                         |
//! |---------------------------|-------------------------------------------|
//! | absent or `null`          | `MissingField`                            |
//! | integer                   | used as is                                |
//! | float                     | truncated toward zero                     |
//! | string                    | trimmed, parsed as an integer literal     |
//! | bool / array / object     | `InvalidInput`                            |
//!
//! After coercion both numbers must be strictly positive.
//!
//! Checks run in a fixed order: missing fields, then the design style, then
//! `budget` and `size`. An unknown style is reported even when the numbers
//! are also bad.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::request::RawEstimateRequest;
//! use serde_json::json;
//!
//! let raw: RawEstimateRequest = serde_json::from_value(json!({
//!     "budget": "500000",
//!     "size": 30.9,
//!     "design_style": "Modern"
//! })).unwrap();
//!
//! let request = raw.validate().unwrap();
//! assert_eq!(request.budget, 500_000);
//! assert_eq!(request.size, 30);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::DesignStyle;

/// A validated estimate request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Spending ceiling in pesos
    pub budget: u64,
    /// Floor area in square meters
    pub size: u64,
    /// Design style to price
    pub design_style: DesignStyle,
}

/// An estimate request exactly as a client sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEstimateRequest {
    #[serde(default)]
    pub budget: Option<Value>,
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default)]
    pub design_style: Option<Value>,
}

impl RawEstimateRequest {
    /// Build a raw request from command-line style strings
    pub fn from_strings(budget: &str, size: &str, design_style: &str) -> Self {
        RawEstimateRequest {
            budget: Some(Value::String(budget.to_string())),
            size: Some(Value::String(size.to_string())),
            design_style: Some(Value::String(design_style.to_string())),
        }
    }

    /// Names of the required fields that are absent, `null`, or an empty
    /// style string.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_absent(&self.budget) {
            missing.push("budget");
        }
        if is_absent(&self.size) {
            missing.push("size");
        }
        if is_absent(&self.design_style) || self.design_style == Some(Value::String(String::new())) {
            missing.push("design_style");
        }
        missing
    }

    /// Validate and coerce every field into a typed request.
    pub fn validate(&self) -> EstimateResult<EstimateRequest> {
        if let Some(field) = self.missing_fields().first() {
            return Err(EstimateError::missing_field(*field));
        }

        let design_style = parse_design_style(self.design_style.as_ref())?;
        let budget = coerce_positive_integer("budget", self.budget.as_ref())?;
        let size = coerce_positive_integer("size", self.size.as_ref())?;

        Ok(EstimateRequest {
            budget,
            size,
            design_style,
        })
    }
}

/// Resolve a JSON value into a design style by exact name.
pub fn parse_design_style(value: Option<&Value>) -> EstimateResult<DesignStyle> {
    match value {
        None | Some(Value::Null) => Err(EstimateError::missing_field("design_style")),
        Some(Value::String(s)) if s.is_empty() => Err(EstimateError::missing_field("design_style")),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(EstimateError::invalid_input(
            "design_style",
            other.to_string(),
            "Design style must be a string",
        )),
    }
}

fn is_absent(value: &Option<Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Coerce a JSON value into a strictly positive integer.
pub fn coerce_positive_integer(field: &str, value: Option<&Value>) -> EstimateResult<u64> {
    let value = match value {
        None | Some(Value::Null) => return Err(EstimateError::missing_field(field)),
        Some(v) => v,
    };

    let truncated: i128 = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i as i128
            } else if let Some(u) = n.as_u64() {
                u as i128
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                float_to_integer(field, f)?
            }
        }
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| {
            EstimateError::invalid_input(field, s.as_str(), "Not an integer")
        })?,
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return Err(EstimateError::invalid_input(
                field,
                value.to_string(),
                "Expected a number",
            ))
        }
        Value::Null => return Err(EstimateError::missing_field(field)),
    };

    if truncated <= 0 {
        return Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive integer",
        ));
    }

    u64::try_from(truncated)
        .map_err(|_| EstimateError::invalid_input(field, value.to_string(), "Value is too large"))
}

fn float_to_integer(field: &str, f: f64) -> EstimateResult<i128> {
    if !f.is_finite() {
        return Err(EstimateError::invalid_input(field, f.to_string(), "Not a finite number"));
    }
    let truncated = f.trunc();
    if truncated.abs() > u64::MAX as f64 {
        return Err(EstimateError::invalid_input(field, f.to_string(), "Value is too large"));
    }
    Ok(truncated as i128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawEstimateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_integers_pass_through() {
        let request = raw(json!({"budget": 500000, "size": 30, "design_style": "Modern"}))
            .validate()
            .unwrap();
        assert_eq!(request.budget, 500_000);
        assert_eq!(request.size, 30);
        assert_eq!(request.design_style, DesignStyle::Modern);
    }

    #[test]
    fn test_floats_are_truncated() {
        let request = raw(json!({"budget": 1000.99, "size": 30.9, "design_style": "Rustic"}))
            .validate()
            .unwrap();
        assert_eq!(request.budget, 1000);
        assert_eq!(request.size, 30);
    }

    #[test]
    fn test_integer_strings_are_parsed() {
        let request = RawEstimateRequest::from_strings(" 250000 ", "45", "Classic")
            .validate()
            .unwrap();
        assert_eq!(request.budget, 250_000);
        assert_eq!(request.size, 45);
    }

    #[test]
    fn test_non_numeric_is_invalid_input() {
        let err = RawEstimateRequest::from_strings("lots", "30", "Modern")
            .validate()
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("budget"));

        let err = RawEstimateRequest::from_strings("1000", "30.5", "Modern")
            .validate()
            .unwrap_err();
        assert_eq!(err, EstimateError::invalid_input("size", "30.5", "Not an integer"));

        for bad in [json!(true), json!([1]), json!({"n": 1})] {
            let err = raw(json!({"budget": 1000, "size": bad, "design_style": "Modern"}))
                .validate()
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_non_positive_is_invalid_input() {
        for bad in [json!(0), json!(-5), json!(0.5), json!("-1")] {
            let err = raw(json!({"budget": bad, "size": 30, "design_style": "Modern"}))
                .validate()
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "input {:?}", bad);
        }
    }

    #[test]
    fn test_missing_fields() {
        let err = raw(json!({"size": 30, "design_style": "Modern"})).validate().unwrap_err();
        assert_eq!(err, EstimateError::missing_field("budget"));

        let err = raw(json!({"budget": 1, "size": null, "design_style": "Modern"}))
            .validate()
            .unwrap_err();
        assert_eq!(err, EstimateError::missing_field("size"));

        let err = raw(json!({"budget": 1, "size": 2, "design_style": ""})).validate().unwrap_err();
        assert_eq!(err, EstimateError::missing_field("design_style"));

        assert_eq!(
            RawEstimateRequest::default().missing_fields(),
            vec!["budget", "size", "design_style"]
        );
    }

    #[test]
    fn test_style_must_be_a_string() {
        let err = raw(json!({"budget": 1, "size": 2, "design_style": 3}))
            .validate()
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_style_reported_before_numbers() {
        let err = RawEstimateRequest::from_strings("1000", "10", "Gothic")
            .validate()
            .unwrap_err();
        assert_eq!(err, EstimateError::invalid_style("Gothic"));

        // Bad numbers do not mask a bad style
        let err = raw(json!({"budget": "abc", "size": 30, "design_style": "Gothic"}))
            .validate()
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STYLE");

        let err = raw(json!({"budget": -1, "size": true, "design_style": "modern"}))
            .validate()
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STYLE");
    }

    #[test]
    fn test_missing_field_reported_before_style() {
        let err = raw(json!({"size": 30, "design_style": "Gothic"})).validate().unwrap_err();
        assert_eq!(err, EstimateError::missing_field("budget"));
    }
}
