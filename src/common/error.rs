// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum AppError {
    // --- Caught before anything reaches the backend ---
    #[error("One or more fields are invalid.")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Scan data for '{field}' is not valid JSON: {source}")]
    InvalidScanData {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} cannot be changed once it has been set.")]
    ImmutableField { field: &'static str },

    // --- Viewer / permissions ---
    #[error("Missing or invalid authorization token.")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    // --- Backend ---
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Could not reach the XCS API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("A newer request replaced this one.")]
    Superseded,

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

/// The error body: the same `{ "message": ... }` convention the XCS API uses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidScanData { .. }
            | AppError::ImmutableField { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Superseded => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ErrorBody {
                    message: self.to_string(),
                    details: Some(details),
                }
            }
            AppError::Transport(e) => {
                tracing::error!(error = %e, "XCS API unreachable");
                ErrorBody {
                    message: "Could not reach the XCS API.".to_string(),
                    details: None,
                }
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:#}", e);
                ErrorBody {
                    message: "An unexpected error occurred.".to_string(),
                    details: None,
                }
            }
            AppError::Superseded => {
                tracing::debug!("dropping superseded response");
                ErrorBody {
                    message: self.to_string(),
                    details: None,
                }
            }
            _ => ErrorBody {
                message: self.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Name is required."))]
        name: String,
    }

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_errors_keep_status_and_message() {
        let (status, body) = body_of(AppError::Upstream {
            status: 403,
            message: "You don't have permission to edit this location.".into(),
        })
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "You don't have permission to edit this location.");
    }

    #[tokio::test]
    async fn validation_errors_list_field_messages() {
        let errors = Form { name: String::new() }.validate().unwrap_err();
        let (status, body) = body_of(AppError::ValidationError(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["name"][0], "Name is required.");
    }

    #[tokio::test]
    async fn invalid_upstream_status_becomes_bad_gateway() {
        let (status, _) = body_of(AppError::Upstream {
            status: 42,
            message: "?".into(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
