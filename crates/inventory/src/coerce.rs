//! Typed coercion of loosely-typed wire values.
//!
//! Each function takes the field name it is coercing so failures can report
//! it. None of them accept `null`: a present-but-null value is a type error,
//! not a missing field.

use serde_json::Value;

use stockkeep_core::{ValidationError, ValidationResult};

use crate::item::{Condition, SKU_MAX_LEN};

/// Coerce to a 32-bit integer.
///
/// Accepts JSON integers, floats without a fractional part, and strings whose
/// trimmed content parses as an integer. Booleans are rejected.
pub fn to_int(field: &'static str, value: &Value) -> ValidationResult<i32> {
    let parsed = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
                .map(|f| f as i32),
        },
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::invalid_type(field))
}

/// Coerce to a boolean.
///
/// Accepts JSON booleans, the integers `0`/`1`, and the strings understood by
/// [`parse_bool`].
pub fn to_bool(field: &'static str, value: &Value) -> ValidationResult<bool> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => parse_bool(s),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::invalid_type(field))
}

/// Parse a boolean-ish string (trimmed, case-insensitive).
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// SKU must be a non-empty string of at most [`SKU_MAX_LEN`] bytes.
pub fn to_sku(value: &Value) -> ValidationResult<String> {
    let sku = value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_type("sku"))?;
    if sku.is_empty() {
        return Err(ValidationError::invalid_value("sku", "sku cannot be empty"));
    }
    if sku.len() > SKU_MAX_LEN {
        return Err(ValidationError::invalid_value(
            "sku",
            format!("sku exceeds {SKU_MAX_LEN} bytes"),
        ));
    }
    Ok(sku.to_string())
}

pub fn to_condition(value: &Value) -> ValidationResult<Condition> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_type("condition"))?
        .parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_accepts_integers_integral_floats_and_numeric_strings() {
        assert_eq!(to_int("count", &json!(10)), Ok(10));
        assert_eq!(to_int("count", &json!(-3)), Ok(-3));
        assert_eq!(to_int("count", &json!(4.0)), Ok(4));
        assert_eq!(to_int("count", &json!(" 12 ")), Ok(12));
    }

    #[test]
    fn int_rejects_everything_else() {
        let err = ValidationError::invalid_type("count");
        assert_eq!(to_int("count", &json!(4.5)), Err(err.clone()));
        assert_eq!(to_int("count", &json!("ten")), Err(err.clone()));
        assert_eq!(to_int("count", &json!(true)), Err(err.clone()));
        assert_eq!(to_int("count", &Value::Null), Err(err.clone()));
        assert_eq!(to_int("count", &json!([1])), Err(err.clone()));
        assert_eq!(to_int("count", &json!(i64::from(i32::MAX) + 1)), Err(err));
    }

    #[test]
    fn bool_accepts_literals_and_boolean_ish_values() {
        assert_eq!(to_bool("in_stock", &json!(true)), Ok(true));
        assert_eq!(to_bool("in_stock", &json!(0)), Ok(false));
        assert_eq!(to_bool("in_stock", &json!("Yes")), Ok(true));
        assert_eq!(to_bool("in_stock", &json!("off")), Ok(false));
        assert_eq!(
            to_bool("in_stock", &json!("maybe")),
            Err(ValidationError::invalid_type("in_stock"))
        );
        assert_eq!(
            to_bool("in_stock", &json!(2)),
            Err(ValidationError::invalid_type("in_stock"))
        );
    }

    #[test]
    fn sku_length_is_bounded() {
        assert_eq!(to_sku(&json!("ABC")), Ok("ABC".to_string()));
        assert_eq!(to_sku(&json!("A".repeat(SKU_MAX_LEN))).map(|s| s.len()), Ok(SKU_MAX_LEN));
        assert!(matches!(
            to_sku(&json!("A".repeat(SKU_MAX_LEN + 1))),
            Err(ValidationError::InvalidValue { field: "sku", .. })
        ));
        assert!(matches!(
            to_sku(&json!("")),
            Err(ValidationError::InvalidValue { field: "sku", .. })
        ));
        assert_eq!(to_sku(&json!(12)), Err(ValidationError::invalid_type("sku")));
    }

    #[test]
    fn condition_must_be_a_string() {
        assert_eq!(to_condition(&json!("Used")), Ok(Condition::Used));
        assert_eq!(
            to_condition(&json!(1)),
            Err(ValidationError::invalid_type("condition"))
        );
    }
}
