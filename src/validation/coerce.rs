use crate::model::{FeatureValue, FieldType};
use serde_json::Value;

/// Coerce a non-null JSON value to `field_type`. Returns `None` when the value
/// cannot represent that type.
pub fn coerce(value: &Value, field_type: FieldType) -> Option<FeatureValue> {
    match field_type {
        FieldType::Float => to_float(value).map(FeatureValue::Float),
        FieldType::Integer => to_integer(value).map(FeatureValue::Integer),
        FieldType::Boolean => to_boolean(value).map(FeatureValue::Boolean),
        FieldType::Text => to_text(value).map(FeatureValue::Text),
    }
}

fn to_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let whole = f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64;
            whole.then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn to_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
