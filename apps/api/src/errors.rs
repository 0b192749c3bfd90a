use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::InterviewError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<InterviewError> for AppError {
    fn from(err: InterviewError) -> Self {
        match err {
            InterviewError::UnknownSession(_) => AppError::NotFound(err.to_string()),
            InterviewError::EmptyAnswers => AppError::Validation(err.to_string()),
            InterviewError::UnmatchedAnswer { .. } => AppError::UnprocessableEntity(err.to_string()),
            InterviewError::Extraction { .. } | InterviewError::Generation(_) => {
                AppError::Llm(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::extract::ExtractionError;

    #[test]
    fn test_interview_errors_map_to_status() {
        let cases = [
            (
                InterviewError::UnknownSession("abc".into()),
                StatusCode::NOT_FOUND,
            ),
            (InterviewError::EmptyAnswers, StatusCode::BAD_REQUEST),
            (
                InterviewError::UnmatchedAnswer {
                    session_id: "abc".into(),
                    question_id: 9,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                InterviewError::Extraction {
                    stage: "question generation",
                    source: ExtractionError::NoJson,
                    preview: "nope".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_unknown_session_message_names_id() {
        let err = AppError::from(InterviewError::UnknownSession("abc-123".into()));
        assert!(err.to_string().contains("abc-123"));
    }
}
