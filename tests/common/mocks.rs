use retirement_api::model::{Fault, FeatureValue, FieldSpec, FieldType, ModelAdapter, Record};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Behaviour {
    /// Label 1 when `Age` is at least 50, else 0.
    AgeRule,
    Fault(Fault),
    WrongCount,
    Panic,
}

/// Mock model adapter for testing
#[derive(Debug, Clone)]
pub struct MockAdapter {
    version: String,
    schema: Vec<FieldSpec>,
    behaviour: Behaviour,
    pub calls: Arc<Mutex<Vec<Vec<Record>>>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self {
            version: "0.0.1".to_string(),
            schema: bank_schema(),
            behaviour: Behaviour::AgeRule,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_schema(mut self, schema: Vec<FieldSpec>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.behaviour = Behaviour::Fault(fault);
        self
    }

    pub fn returning_wrong_count(mut self) -> Self {
        self.behaviour = Behaviour::WrongCount;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.behaviour = Behaviour::Panic;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<Vec<Record>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelAdapter for MockAdapter {
    fn version(&self) -> &str {
        &self.version
    }

    fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    fn class_labels(&self) -> &[i64] {
        &[0, 1]
    }

    fn predict(&self, records: &[Record]) -> Result<Vec<i64>, Fault> {
        self.calls.lock().unwrap().push(records.to_vec());

        match &self.behaviour {
            Behaviour::AgeRule => Ok(records
                .iter()
                .map(|record| match record.get("Age").and_then(FeatureValue::as_f64) {
                    Some(age) if age >= 50.0 => 1,
                    _ => 0,
                })
                .collect()),
            Behaviour::Fault(fault) => Err(fault.clone()),
            Behaviour::WrongCount => Ok(vec![0; records.len() + 1]),
            Behaviour::Panic => panic!("mock adapter blew up"),
        }
    }
}

/// The two-field schema the bank retirement model expects.
pub fn bank_schema() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("Age", FieldType::Float),
        FieldSpec::new("Savings", FieldType::Float),
    ]
}
