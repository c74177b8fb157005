use crate::{
    model::FieldSpec,
    validation::{ValidationErrors, Violation},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 422 rejection: every violation found in the batch.
#[derive(Debug, Serialize)]
pub struct RejectionResponse {
    pub detail: Vec<Violation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub name: String,
    pub api_version: String,
    pub model_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub version: String,
    pub fields: Vec<FieldSpec>,
    pub class_labels: Vec<i64>,
    pub example: Value,
}

#[derive(Debug)]
pub enum ApiError {
    Rejected(ValidationErrors),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RejectionResponse {
                    detail: errors.into_vec(),
                }),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
