use super::{FeatureValue, Fault, FieldSpec, ModelAdapter, Record};
use crate::{Result, config::ModelConfig};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Term {
    field: String,
    coefficient: f64,
    mean: f64,
    scale: f64,
    fill_value: Option<f64>,
}

/// Standardised logistic-regression classifier built from configuration.
///
/// Each scored feature is centred and scaled before being weighted, matching
/// a `StandardScaler -> LogisticRegression` pipeline exported as plain numbers.
#[derive(Debug, Clone)]
pub struct LogisticAdapter {
    version: String,
    schema: Vec<FieldSpec>,
    terms: Vec<Term>,
    intercept: f64,
    threshold: f64,
    class_labels: [i64; 2],
}

impl LogisticAdapter {
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        config.validate()?;

        let mut schema = Vec::with_capacity(config.features.len());
        let mut terms = Vec::new();

        for feature in &config.features {
            schema.push(feature.spec());

            if let Some(coefficient) = feature.coefficient {
                terms.push(Term {
                    field: feature.name.clone(),
                    coefficient,
                    mean: feature.mean,
                    scale: feature.scale,
                    fill_value: feature.fill_value,
                });
            }
        }

        let class_labels = [config.class_labels[0], config.class_labels[1]];

        info!(
            "Loaded logistic model {} with {} fields ({} scored)",
            config.version,
            schema.len(),
            terms.len()
        );

        Ok(Self {
            version: config.version.clone(),
            schema,
            terms,
            intercept: config.intercept,
            threshold: config.threshold,
            class_labels,
        })
    }

    /// Probability of the positive class for a single record.
    pub fn probability(&self, record: &Record) -> std::result::Result<f64, Fault> {
        let mut z = self.intercept;

        for term in &self.terms {
            let x = match record.get(&term.field) {
                Some(FeatureValue::Null) | None => term.fill_value.ok_or_else(|| {
                    Fault::incompatible(format!(
                        "feature '{}' is empty and the model has no fill value for it",
                        term.field
                    ))
                })?,
                Some(value) => value.as_f64().ok_or_else(|| {
                    Fault::incompatible(format!("feature '{}' is not numeric", term.field))
                })?,
            };
            z += term.coefficient * (x - term.mean) / term.scale;
        }

        if !z.is_finite() {
            return Err(Fault::numeric(format!(
                "decision function evaluated to {}",
                z
            )));
        }

        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl ModelAdapter for LogisticAdapter {
    fn version(&self) -> &str {
        &self.version
    }

    fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    fn class_labels(&self) -> &[i64] {
        &self.class_labels
    }

    fn predict(&self, records: &[Record]) -> std::result::Result<Vec<i64>, Fault> {
        debug!("Scoring {} records with model {}", records.len(), self.version);

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let p = self
                    .probability(record)
                    .map_err(|fault| fault.at_record(index))?;
                Ok(if p >= self.threshold {
                    self.class_labels[1]
                } else {
                    self.class_labels[0]
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureConfig;
    use crate::model::{FaultKind, FieldType};

    fn feature(name: &str, coefficient: f64, mean: f64, scale: f64) -> FeatureConfig {
        FeatureConfig {
            name: name.to_string(),
            field_type: FieldType::Float,
            nullable: false,
            coefficient: Some(coefficient),
            mean,
            scale,
            fill_value: None,
        }
    }

    fn model() -> LogisticAdapter {
        let config = ModelConfig {
            version: "0.0.1".to_string(),
            threshold: 0.5,
            class_labels: vec![0, 1],
            intercept: 0.0,
            features: vec![
                feature("Age", 2.0, 40.0, 10.0),
                feature("Savings", 1.0, 500_000.0, 100_000.0),
            ],
        };
        LogisticAdapter::from_config(&config).unwrap()
    }

    #[test]
    fn test_probability_at_means_is_one_half() {
        let record = Record::new()
            .with("Age", FeatureValue::Float(40.0))
            .with("Savings", FeatureValue::Float(500_000.0));
        let p = model().probability(&record).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_predict_thresholds_into_labels() {
        let old_and_rich = Record::new()
            .with("Age", FeatureValue::Float(65.0))
            .with("Savings", FeatureValue::Float(900_000.0));
        let young_and_poor = Record::new()
            .with("Age", FeatureValue::Float(25.0))
            .with("Savings", FeatureValue::Float(10_000.0));

        let labels = model().predict(&[old_and_rich, young_and_poor]).unwrap();
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn test_missing_value_without_fill_is_fault() {
        let record = Record::new()
            .with("Age", FeatureValue::Float(40.0))
            .with("Savings", FeatureValue::Null);
        let fault = model().predict(&[record]).unwrap_err();
        assert_eq!(fault.kind, FaultKind::IncompatibleFeatures);
        assert_eq!(fault.record, Some(0));
    }

    #[test]
    fn test_schema_keeps_declaration_order() {
        let names: Vec<_> = model().schema().iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec!["Age", "Savings"]);
        assert_eq!(model().schema()[0].field_type, FieldType::Float);
    }

    #[test]
    fn test_nullable_feature_uses_fill_value() {
        let mut config = ModelConfig {
            version: "0.0.1".to_string(),
            threshold: 0.5,
            class_labels: vec![0, 1],
            intercept: 0.0,
            features: vec![feature("Age", 2.0, 40.0, 10.0)],
        };
        config.features[0].nullable = true;
        config.features[0].fill_value = Some(70.0);
        let adapter = LogisticAdapter::from_config(&config).unwrap();

        let record = Record::new().with("Age", FeatureValue::Null);
        assert_eq!(adapter.predict(&[record]).unwrap(), vec![1]);
    }

    #[test]
    fn test_overflowing_score_is_numeric_fault() {
        let config = ModelConfig {
            version: "0.0.1".to_string(),
            threshold: 0.5,
            class_labels: vec![0, 1],
            intercept: 0.0,
            features: vec![feature("Savings", 1e300, 0.0, 1e-300)],
        };
        let adapter = LogisticAdapter::from_config(&config).unwrap();

        let ok = Record::new().with("Savings", FeatureValue::Float(0.0));
        let huge = Record::new().with("Savings", FeatureValue::Float(1.0));
        let fault = adapter.predict(&[ok, huge]).unwrap_err();
        assert_eq!(fault.kind, FaultKind::NumericError);
        assert_eq!(fault.record, Some(1));
    }

    #[test]
    fn test_custom_class_labels() {
        let config = ModelConfig {
            version: "0.0.1".to_string(),
            threshold: 0.5,
            class_labels: vec![-1, 7],
            intercept: 0.0,
            features: vec![feature("Age", 1.0, 0.0, 1.0)],
        };
        let adapter = LogisticAdapter::from_config(&config).unwrap();

        let records = [
            Record::new().with("Age", FeatureValue::Float(-3.0)),
            Record::new().with("Age", FeatureValue::Integer(3)),
        ];
        assert_eq!(adapter.predict(&records).unwrap(), vec![-1, 7]);
        assert_eq!(adapter.class_labels(), &[-1, 7]);
    }
}
