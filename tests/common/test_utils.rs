use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use retirement_api::{
    Result,
    config::{Config, FeatureConfig, LogsConfig, ModelConfig, ServerConfig},
    model::{FieldType, ModelAdapter},
    prediction::PredictionService,
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        project_name: "Bank Retirement API".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8001,
            api_prefix: "/api/v1".to_string(),
            cors_origins: vec![],
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        model: ModelConfig {
            version: "0.0.1".to_string(),
            threshold: 0.5,
            class_labels: vec![0, 1],
            intercept: 0.45,
            features: vec![
                scored_feature("Age", 3.4, 46.7576, 7.7904),
                scored_feature("Savings", 3.3, 434746.0, 194146.0),
            ],
        },
    }
}

pub fn scored_feature(name: &str, coefficient: f64, mean: f64, scale: f64) -> FeatureConfig {
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

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, content)?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Router wired to the given adapter with the default server settings
pub fn create_test_app(adapter: Arc<dyn ModelAdapter>) -> Router {
    create_test_app_with(adapter, &create_test_config().server)
}

pub fn create_test_app_with(adapter: Arc<dyn ModelAdapter>, server: &ServerConfig) -> Router {
    let state = AppState::new(
        PredictionService::new(adapter),
        "Bank Retirement API",
        &server.api_prefix,
    );
    server::router(state, server).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_str(&read_body(response).await).unwrap()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
project_name: "Bank Retirement API"

server:
  host: "127.0.0.1"
  port: 8001
  api_prefix: "/api/v1"
  cors_origins:
    - "http://localhost:3000"
  logs:
    level: "debug"

model:
  version: "0.0.1"
  intercept: 0.45
  features:
    - name: Age
      type: float
      coefficient: 3.4
      mean: 46.7576
      scale: 7.7904
    - name: Savings
      type: float
      coefficient: 3.3
      mean: 434746.0
      scale: 194146.0
"#;

/// Only the model section; everything else falls back to defaults
pub const MINIMAL_CONFIG_YAML: &str = r#"
model:
  version: "1.2.3"
  features:
    - name: Age
      coefficient: 1.0
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

model:
  version: "0.0.1"
"#;
