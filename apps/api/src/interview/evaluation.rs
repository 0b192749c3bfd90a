//! Answer evaluation: per-answer scoring and the session-level summary.
//!
//! Flow: evaluate_answer (one model call per answer) → summarize_scores →
//!       summary prompt (one model call) → ComprehensiveEvaluation.

use serde::Deserialize;
use tracing::{info, warn};

use crate::interview::extract::{extract_object, preview};
use crate::interview::models::{
    AdditionalScore, Answer, ComprehensiveEvaluation, Question, QuestionFeedback, StarScore,
    SummaryFeedback,
};
use crate::interview::prompts::{build_evaluation_prompt, build_summary_prompt};
use crate::interview::scoring::{summarize_scores, total_score};
use crate::interview::InterviewError;
use crate::llm_client::TextGenerator;

/// Shape the evaluation prompt asks for. Both score blocks are mandatory.
#[derive(Debug, Deserialize)]
struct EvaluationPayload {
    star_score: StarScore,
    additional_score: AdditionalScore,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    example_answer: String,
}

/// Scores one answer. An unreadable or incomplete reply fails the call.
pub async fn evaluate_answer(
    llm: &dyn TextGenerator,
    question: &Question,
    answer: &Answer,
    job_position: &str,
) -> Result<QuestionFeedback, InterviewError> {
    let prompt = build_evaluation_prompt(question, answer, job_position);
    let response = llm.generate(&prompt).await?;

    let payload: EvaluationPayload =
        extract_object(&response).map_err(|source| InterviewError::Extraction {
            stage: "answer evaluation",
            source,
            preview: preview(&response),
        })?;

    Ok(QuestionFeedback {
        question_id: question.id,
        question_content: question.content.clone(),
        user_answer: answer.content.clone(),
        total_score: total_score(&payload.star_score, &payload.additional_score),
        star_score: payload.star_score,
        additional_score: payload.additional_score,
        strengths: payload.strengths,
        improvements: payload.improvements,
        example_answer: payload.example_answer,
    })
}

/// Aggregates per-answer feedback and asks the model for the overall narrative.
///
/// An unreadable summary reply falls back to `SummaryFeedback::fallback`.
pub async fn build_comprehensive_evaluation(
    llm: &dyn TextGenerator,
    interview_id: &str,
    job_position: &str,
    feedbacks: Vec<QuestionFeedback>,
) -> Result<ComprehensiveEvaluation, InterviewError> {
    let scores = summarize_scores(&feedbacks).ok_or(InterviewError::EmptyAnswers)?;

    let prompt = build_summary_prompt(
        job_position,
        &feedbacks,
        &scores.star_averages,
        &scores.additional_averages,
        scores.overall_score,
    );
    let response = llm.generate(&prompt).await?;

    let summary = extract_object::<SummaryFeedback>(&response).unwrap_or_else(|e| {
        warn!(
            "Summary reply for interview {interview_id} unreadable ({e}), using fallback: {}",
            preview(&response)
        );
        SummaryFeedback::fallback(job_position)
    });

    info!(
        "Interview {interview_id} evaluated: {} answers, score {} ({})",
        feedbacks.len(),
        scores.overall_score,
        scores.overall_grade
    );

    Ok(ComprehensiveEvaluation {
        interview_id: interview_id.to_string(),
        job_position: job_position.to_string(),
        overall_score: scores.overall_score,
        overall_grade: scores.overall_grade,
        star_averages: scores.star_averages,
        additional_averages: scores.additional_averages,
        question_feedbacks: feedbacks,
        overall_strengths: summary.overall_strengths,
        overall_improvements: summary.overall_improvements,
        final_advice: summary.final_advice,
    })
}
