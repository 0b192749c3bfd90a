//! Question generation: turns a self-introduction and job title into interview questions.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::interview::extract::{extract, preview};
use crate::interview::models::Question;
use crate::interview::prompts::{build_question_prompt, QUESTION_COUNT};
use crate::interview::InterviewError;
use crate::llm_client::TextGenerator;

/// Asks the model for the question set. Any unreadable reply is fatal; there is no retry.
pub async fn generate_question_set(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_position: &str,
) -> Result<Vec<Question>, InterviewError> {
    let prompt = build_question_prompt(resume_text, job_position);
    let response = llm.generate(&prompt).await?;

    let questions: Vec<Question> =
        extract(&response).map_err(|source| InterviewError::Extraction {
            stage: "question generation",
            source,
            preview: preview(&response),
        })?;

    check_question_set(&questions);
    info!(
        "Generated {} questions for position '{job_position}'",
        questions.len()
    );

    Ok(questions)
}

/// Count and category uniqueness are requested in the prompt only; deviations are logged, not rejected.
fn check_question_set(questions: &[Question]) {
    if questions.len() != QUESTION_COUNT {
        warn!(
            "Expected {QUESTION_COUNT} questions, model returned {}",
            questions.len()
        );
    }

    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(q.category.trim().to_lowercase()) {
            warn!("Duplicate question category '{}' (question {})", q.category, q.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::extract::ExtractionError;
    use crate::interview::test_support::{seven_questions_response, ScriptedGenerator};

    #[tokio::test]
    async fn test_parses_seven_questions_in_order() {
        let llm = ScriptedGenerator::new([seven_questions_response()]);
        let questions = generate_question_set(&llm, "cv", "Backend Engineer")
            .await
            .unwrap();

        assert_eq!(questions.len(), 7);
        for (i, q) in questions.iter().enumerate() {
            let id = i as u32 + 1;
            assert_eq!(q.id, id);
            assert_eq!(q.category, format!("Category {id}"));
            assert_eq!(q.time_limit_seconds, 60 + id * 10);
        }
        assert!(llm.prompts()[0].contains("Backend Engineer"));
    }

    #[tokio::test]
    async fn test_missing_time_limit_defaults_to_120() {
        let llm = ScriptedGenerator::new([
            r#"[{"id": 1, "category": "지원동기", "content": "Why this team?"}]"#,
        ]);
        let questions = generate_question_set(&llm, "cv", "PM").await.unwrap();

        assert_eq!(questions[0].time_limit_seconds, 120);
        assert_eq!(questions[0].category, "지원동기");
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_fatal_with_preview() {
        let reply = "Sorry, I cannot produce questions for this input.".repeat(10);
        let llm = ScriptedGenerator::new([reply.clone()]);

        let err = generate_question_set(&llm, "cv", "PM").await.unwrap_err();
        match err {
            InterviewError::Extraction {
                stage,
                source,
                preview,
            } => {
                assert_eq!(stage, "question generation");
                assert!(matches!(source, ExtractionError::NoJson));
                assert_eq!(preview.chars().count(), 200);
                assert!(reply.starts_with(&preview));
            }
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_item_missing_content_is_schema_error() {
        let llm = ScriptedGenerator::new([r#"[{"id": 1, "category": "Motivation"}]"#]);
        let err = generate_question_set(&llm, "cv", "PM").await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Extraction {
                source: ExtractionError::Schema(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let llm = ScriptedGenerator::default();
        llm.push_failure("overloaded");
        let err = generate_question_set(&llm, "cv", "PM").await.unwrap_err();
        assert!(matches!(err, InterviewError::Generation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_categories_are_accepted() {
        let llm = ScriptedGenerator::new([
            r#"[{"id": 1, "category": "Technical", "content": "a"}, {"id": 2, "category": "technical", "content": "b"}]"#,
        ]);
        let questions = generate_question_set(&llm, "cv", "PM").await.unwrap();
        assert_eq!(questions.len(), 2);
    }
}
