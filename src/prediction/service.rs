use super::{
    PredictionResponse,
    stage::{PredictionEvent, PredictionStateMachine},
};
use crate::{
    Result,
    model::{Fault, FieldSpec, ModelAdapter},
    validation,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Validates prediction batches and forwards them to the model adapter.
#[derive(Clone)]
pub struct PredictionService {
    adapter: Arc<dyn ModelAdapter>,
}

impl PredictionService {
    pub fn new(adapter: Arc<dyn ModelAdapter>) -> Self {
        Self { adapter }
    }

    pub fn version(&self) -> &str {
        self.adapter.version()
    }

    pub fn schema(&self) -> &[FieldSpec] {
        self.adapter.schema()
    }

    pub fn class_labels(&self) -> &[i64] {
        self.adapter.class_labels()
    }

    /// Run one request body through validation and scoring.
    ///
    /// A body that fails validation yields `Error::Validation` and the adapter
    /// is not called. Adapter faults are not errors here: they come back as a
    /// response with `errors` set.
    pub fn predict(&self, body: &Value) -> Result<PredictionResponse> {
        let mut fsm = PredictionStateMachine::new();

        let records = match validation::validate_batch(body, self.adapter.schema()) {
            Ok(records) => {
                fsm.transition(PredictionEvent::ValidationPassed)?;
                records
            }
            Err(errors) => {
                fsm.transition(PredictionEvent::ValidationFailed)?;
                warn!("Rejected prediction batch: {}", errors);
                return Err(errors.into());
            }
        };

        let expected = records.len();
        let version = self.adapter.version();

        let scored = self.adapter.predict(&records).and_then(|labels| {
            if labels.len() == expected {
                Ok(labels)
            } else {
                Err(Fault::output_mismatch(expected, labels.len()))
            }
        });

        match scored {
            Ok(labels) => {
                fsm.transition(PredictionEvent::AdapterSucceeded)?;
                info!(
                    "Scored {} records with model version {}",
                    labels.len(),
                    version
                );
                Ok(PredictionResponse::success(version, labels))
            }
            Err(fault) => {
                fsm.transition(PredictionEvent::AdapterFaulted)?;
                warn!("Model {} failed to score batch: {}", version, fault);
                Ok(PredictionResponse::fault(version, serde_json::to_value(&fault)?))
            }
        }
    }
}
