//! Batch validation of raw prediction inputs against an adapter schema.
//!
//! Validation never stops at the first problem: every record and every
//! declared field is checked, so one rejection reports everything wrong with
//! the batch.

mod coerce;
mod types;

pub use coerce::coerce;
pub use types::*;

use crate::model::{FeatureValue, FieldSpec, Record};
use serde_json::{Map, Value};

/// Validate a request body of the form `{"inputs": [{...}, ...]}`.
pub fn validate_batch(body: &Value, schema: &[FieldSpec]) -> Result<Vec<Record>, ValidationErrors> {
    let inputs = match body.get("inputs") {
        Some(Value::Array(inputs)) => inputs,
        Some(other) => {
            return Err(Violation::batch(other.clone(), "inputs must be a list of records").into());
        }
        None => {
            return Err(Violation::batch(Value::Null, "inputs is required").into());
        }
    };

    validate_records(inputs, schema)
}

/// Validate an already extracted list of raw records.
pub fn validate_records(inputs: &[Value], schema: &[FieldSpec]) -> Result<Vec<Record>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut records = Vec::with_capacity(inputs.len());

    for (index, raw) in inputs.iter().enumerate() {
        match raw {
            Value::Object(fields) => {
                if let Some(record) = validate_record(index, fields, schema, &mut errors) {
                    records.push(record);
                }
            }
            other => errors.push(Violation::record(
                index,
                other.clone(),
                "record must be an object",
            )),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(errors)
    }
}

fn validate_record(
    index: usize,
    fields: &Map<String, Value>,
    schema: &[FieldSpec],
    errors: &mut ValidationErrors,
) -> Option<Record> {
    let before = errors.len();
    let mut record = Record::new();

    for spec in schema {
        match fields.get(&spec.name) {
            None if spec.nullable => record.insert(&spec.name, FeatureValue::Null),
            None => errors.push(Violation::field(
                index,
                &spec.name,
                Value::Null,
                ViolationKind::MissingField,
                "field required",
            )),
            Some(Value::Null) if spec.nullable => record.insert(&spec.name, FeatureValue::Null),
            Some(Value::Null) => errors.push(Violation::field(
                index,
                &spec.name,
                Value::Null,
                ViolationKind::NullNotAllowed,
                "none is not an allowed value",
            )),
            Some(value) => match coerce(value, spec.field_type) {
                Some(coerced) => record.insert(&spec.name, coerced),
                None => errors.push(Violation::field(
                    index,
                    &spec.name,
                    value.clone(),
                    ViolationKind::TypeMismatch,
                    format!("value is not a valid {}", spec.field_type),
                )),
            },
        }
    }

    (errors.len() == before).then_some(record)
}
