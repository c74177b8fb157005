use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by a prediction that passed validation.
///
/// Exactly one of `predictions` and `errors` is set. Both are serialised as
/// `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub version: String,
    pub predictions: Option<Vec<i64>>,
    pub errors: Option<Value>,
}

impl PredictionResponse {
    pub fn success(version: impl Into<String>, predictions: Vec<i64>) -> Self {
        Self {
            version: version.into(),
            predictions: Some(predictions),
            errors: None,
        }
    }

    pub fn fault(version: impl Into<String>, errors: Value) -> Self {
        Self {
            version: version.into(),
            predictions: None,
            errors: Some(errors),
        }
    }

    pub fn is_success(&self) -> bool {
        self.predictions.is_some()
    }
}
