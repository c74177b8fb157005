use super::types::{ApiError, HealthResponse, SchemaResponse};
use crate::{
    Error,
    model::{FieldSpec, FieldType},
    prediction::{PredictionResponse, PredictionService},
};
use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{error, info, info_span};
use uuid::Uuid;

const INDEX_TEMPLATE: &str = include_str!("index.html");

#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub project_name: Arc<str>,
    index_page: Arc<str>,
}

impl AppState {
    pub fn new(service: PredictionService, project_name: &str, api_prefix: &str) -> Self {
        let index_page = INDEX_TEMPLATE
            .replace("{{project_name}}", &escape_html(project_name))
            .replace("{{api_prefix}}", &escape_html(api_prefix));
        Self {
            service,
            project_name: Arc::from(project_name),
            index_page: Arc::from(index_page),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_page.to_string())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        name: state.project_name.to_string(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
        model_version: state.service.version().to_string(),
    })
}

pub async fn schema(State(state): State<AppState>) -> Json<SchemaResponse> {
    let fields = state.service.schema().to_vec();
    let example = json!({ "inputs": [example_record(&fields)] });
    Json(SchemaResponse {
        version: state.service.version().to_string(),
        fields,
        class_labels: state.service.class_labels().to_vec(),
        example,
    })
}

pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let batch_size = body
        .get("inputs")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    info!(%request_id, "Received prediction request with {} records", batch_size);

    let service = state.service.clone();
    let span = info_span!("predict", %request_id);
    let result = tokio::task::spawn_blocking(move || span.in_scope(|| service.predict(&body)))
        .await
        .map_err(|e| {
            error!(%request_id, "Prediction task did not complete: {}", e);
            ApiError::Internal
        })?;

    match result {
        Ok(response) => Ok(Json(response)),
        Err(Error::Validation(errors)) => {
            info!(%request_id, "Rejecting request with {} violations", errors.len());
            Err(ApiError::Rejected(errors))
        }
        Err(e) => {
            error!(%request_id, "Failed to process prediction request: {}", e);
            Err(ApiError::Internal)
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn example_record(fields: &[FieldSpec]) -> Value {
    let mut record = Map::new();
    for field in fields {
        let value = match (field.name.as_str(), field.field_type) {
            ("Age", FieldType::Float) => json!(39.1807143),
            ("Savings", FieldType::Float) => json!(322349.874),
            (_, FieldType::Float) => json!(0.0),
            (_, FieldType::Integer) => json!(0),
            (_, FieldType::Boolean) => json!(false),
            (_, FieldType::Text) => json!(""),
        };
        record.insert(field.name.clone(), value);
    }
    Value::Object(record)
}
