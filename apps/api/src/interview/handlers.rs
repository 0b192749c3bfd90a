//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::{Answer, ComprehensiveEvaluation, FollowUpDecision, Question};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub resume_text: String,
    pub job_position: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInterviewResponse {
    pub interview_id: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FollowUpRequest {
    pub question: Question,
    pub answer: Answer,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub answers: Vec<Answer>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Generates the question set for a self-introduction and opens a session.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<Json<CreateInterviewResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.job_position.trim().is_empty() {
        return Err(AppError::Validation("job_position cannot be empty".to_string()));
    }

    let session = state
        .interviews
        .generate_questions(&request.resume_text, &request.job_position)
        .await?;

    Ok(Json(CreateInterviewResponse {
        interview_id: session.id.clone(),
        questions: session.questions.clone(),
        created_at: session.created_at,
    }))
}

/// POST /api/v1/interviews/:id/followup
///
/// Decides whether the answer needs a follow-up question.
pub async fn handle_followup(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
    Json(request): Json<FollowUpRequest>,
) -> Result<Json<FollowUpDecision>, AppError> {
    let decision = state
        .interviews
        .generate_followup_question(&interview_id, &request.question, &request.answer)
        .await?;
    Ok(Json(decision))
}

/// POST /api/v1/interviews/:id/evaluate
///
/// Scores every answer and returns the comprehensive evaluation.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<ComprehensiveEvaluation>, AppError> {
    let evaluation = state
        .interviews
        .evaluate_answers(&interview_id, &request.answers)
        .await?;
    Ok(Json(evaluation))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_close_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.interviews.close_session(&interview_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
