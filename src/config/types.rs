use crate::{
    Error, Result,
    model::{FieldSpec, FieldType},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default)]
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub version: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_class_labels")]
    pub class_labels: Vec<i64>,
    #[serde(default)]
    pub intercept: f64,
    pub features: Vec<FeatureConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub nullable: bool,
    /// Unscored fields are still validated but do not enter the model.
    #[serde(default)]
    pub coefficient: Option<f64>,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub fill_value: Option<f64>,
}

impl FeatureConfig {
    pub fn spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.name.clone(),
            field_type: self.field_type,
            nullable: self.nullable,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.model.validate()
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(Error::config(format!(
                "api_prefix must start with '/' and must not end with '/': '{}'",
                self.api_prefix
            )));
        }
        Ok(())
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::config("model version must not be empty"));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::config(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        if self.class_labels.len() != 2 || self.class_labels[0] == self.class_labels[1] {
            return Err(Error::config(
                "class_labels must hold exactly two distinct labels",
            ));
        }
        if !self.intercept.is_finite() {
            return Err(Error::config("intercept must be finite"));
        }
        if self.features.is_empty() {
            return Err(Error::config("model must declare at least one feature"));
        }

        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.name.as_str()) {
                return Err(Error::config(format!(
                    "duplicate feature '{}'",
                    feature.name
                )));
            }
            let Some(coefficient) = feature.coefficient else {
                continue;
            };
            if feature.field_type == FieldType::Text {
                return Err(Error::config(format!(
                    "feature '{}' is a string and cannot carry a coefficient",
                    feature.name
                )));
            }
            if !coefficient.is_finite() || !feature.mean.is_finite() {
                return Err(Error::config(format!(
                    "feature '{}' has a non-finite coefficient or mean",
                    feature.name
                )));
            }
            if !feature.scale.is_finite() || feature.scale == 0.0 {
                return Err(Error::config(format!(
                    "feature '{}' needs a finite, non-zero scale",
                    feature.name
                )));
            }
            match feature.fill_value {
                None if feature.nullable => {
                    return Err(Error::config(format!(
                        "feature '{}' is nullable and scored, so it needs a fill_value",
                        feature.name
                    )));
                }
                Some(fill) if !fill.is_finite() => {
                    return Err(Error::config(format!(
                        "feature '{}' has a non-finite fill_value",
                        feature.name
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors_origins: Vec::new(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_project_name() -> String {
    "Bank Retirement API".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_class_labels() -> Vec<i64> {
    vec![0, 1]
}

fn default_field_type() -> FieldType {
    FieldType::Float
}

fn default_scale() -> f64 {
    1.0
}
