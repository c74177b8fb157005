use crate::{Error, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Fault,
}

// Request stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionStage {
    Validating,
    Invoking,
    Responded(Outcome),
    Rejected,
}

// Stage events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionEvent {
    ValidationPassed,
    ValidationFailed,
    AdapterSucceeded,
    AdapterFaulted,
}

/// Tracks a single prediction request from validation to its terminal stage.
#[derive(Debug)]
pub struct PredictionStateMachine {
    stage: PredictionStage,
}

impl Default for PredictionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionStateMachine {
    pub fn new() -> Self {
        Self {
            stage: PredictionStage::Validating,
        }
    }

    pub fn current_stage(&self) -> PredictionStage {
        self.stage
    }

    pub fn transition(&mut self, event: PredictionEvent) -> Result<PredictionStage> {
        let new_stage = match (self.stage, event) {
            (PredictionStage::Validating, PredictionEvent::ValidationPassed) => {
                PredictionStage::Invoking
            }
            (PredictionStage::Validating, PredictionEvent::ValidationFailed) => {
                PredictionStage::Rejected
            }
            (PredictionStage::Invoking, PredictionEvent::AdapterSucceeded) => {
                PredictionStage::Responded(Outcome::Success)
            }
            (PredictionStage::Invoking, PredictionEvent::AdapterFaulted) => {
                PredictionStage::Responded(Outcome::Fault)
            }
            _ => {
                warn!(
                    "Invalid prediction transition from {:?} with event {:?}",
                    self.stage, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.stage),
                    requested: format!("{:?}", event),
                });
            }
        };

        debug!(
            "Prediction stage transition: {:?} -> {:?} (event: {:?})",
            self.stage, new_stage, event
        );

        self.stage = new_stage;
        Ok(new_stage)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.stage,
            PredictionStage::Responded(_) | PredictionStage::Rejected
        )
    }
}
