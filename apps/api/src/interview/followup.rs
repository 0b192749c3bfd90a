//! Follow-up decision: decides whether an answer needs one clarifying question.

use tracing::{debug, warn};

use crate::interview::extract::{extract_object, preview};
use crate::interview::models::{Answer, FollowUpDecision, Question};
use crate::interview::prompts::build_followup_prompt;
use crate::llm_client::{LlmError, TextGenerator};

/// Asks the model for a follow-up decision.
///
/// An unreadable reply degrades to `FollowUpDecision::parse_failure()`; only a
/// failed backend call is an error.
pub async fn decide_followup(
    llm: &dyn TextGenerator,
    question: &Question,
    answer: &Answer,
    job_position: &str,
) -> Result<FollowUpDecision, LlmError> {
    let prompt = build_followup_prompt(question, answer, job_position);
    let response = llm.generate(&prompt).await?;

    match extract_object::<FollowUpDecision>(&response) {
        Ok(decision) => {
            debug!(
                "Follow-up decision for question {}: has_followup={}",
                question.id, decision.has_followup
            );
            Ok(decision)
        }
        Err(e) => {
            warn!(
                "Follow-up reply for question {} unreadable ({e}), skipping follow-up: {}",
                question.id,
                preview(&response)
            );
            Ok(FollowUpDecision::parse_failure())
        }
    }
}
