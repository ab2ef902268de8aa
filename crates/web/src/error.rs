use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Storage(StorageError::Workflow(e)) if e.is_permission() => StatusCode::FORBIDDEN,
            Self::Storage(StorageError::Workflow(e)) if e.is_conflict() => StatusCode::CONFLICT,
            Self::Storage(StorageError::Workflow(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg))
            | Self::Storage(StorageError::Forbidden(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(StorageError::Workflow(e)) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();
                field_errors.sort();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) | Self::Forbidden(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use storage::models::SubmissionStatus;
    use storage::services::workflow::WorkflowError;
    use validator::ValidationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_storage_errors_map_to_status_codes() {
        let cases = [
            (StorageError::NotFound, StatusCode::NOT_FOUND),
            (
                StorageError::ConstraintViolation("duplicate".into()),
                StatusCode::CONFLICT,
            ),
            (
                StorageError::Forbidden("not yours".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                StorageError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(WebError::from(error).status_code(), expected);
        }
    }

    #[test]
    fn test_workflow_errors_map_to_status_codes() {
        let cases = [
            (WorkflowError::NotReviewer, StatusCode::FORBIDDEN),
            (WorkflowError::NotOwner, StatusCode::FORBIDDEN),
            (
                WorkflowError::NotPending(SubmissionStatus::Approved),
                StatusCode::CONFLICT,
            ),
            (
                WorkflowError::NotReviewed(SubmissionStatus::Pending),
                StatusCode::CONFLICT,
            ),
            (
                WorkflowError::Locked(SubmissionStatus::Rejected),
                StatusCode::CONFLICT,
            ),
            (WorkflowError::MissingScore, StatusCode::BAD_REQUEST),
            (WorkflowError::MissingRejectReason, StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            let web_error = WebError::from(StorageError::from(error));
            assert_eq!(web_error.status_code(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_errors_are_not_leaked() {
        let response =
            WebError::from(StorageError::Database(sqlx::Error::PoolTimedOut)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_validation_errors_list_details() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "description",
            ValidationError::new("length").with_message("Description is too long".into()),
        );
        errors.add("proof_url", ValidationError::new("length"));

        let response = WebError::from(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["details"],
            json!(["description: Description is too long", "proof_url: length"])
        );
    }

    #[tokio::test]
    async fn test_workflow_error_message_is_returned() {
        let response =
            WebError::from(StorageError::from(WorkflowError::MissingRejectReason)).into_response();

        let body = body_json(response).await;
        assert_eq!(body["error"], WorkflowError::MissingRejectReason.to_string());
    }
}
