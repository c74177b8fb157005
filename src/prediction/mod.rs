mod service;
pub mod stage;
mod types;

pub use service::PredictionService;
pub use stage::{Outcome, PredictionEvent, PredictionStage, PredictionStateMachine};
pub use types::PredictionResponse;
