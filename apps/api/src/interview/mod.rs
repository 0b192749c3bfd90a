// Mock interview engine.
// Implements: question generation, follow-up decisions, answer evaluation, and session tracking.
// All model calls go through the `TextGenerator` trait; nothing here talks HTTP.

pub mod evaluation;
pub mod extract;
pub mod followup;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod questions;
pub mod scoring;
pub mod service;
pub mod session;

use thiserror::Error;

use crate::interview::extract::ExtractionError;
use crate::llm_client::LlmError;

pub use service::InterviewService;

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Session not found: {0}")]
    UnknownSession(String),

    #[error("No feedbacks to aggregate: the answer list is empty")]
    EmptyAnswers,

    #[error("Answer refers to question {question_id}, which is not part of session {session_id}")]
    UnmatchedAnswer { session_id: String, question_id: u32 },

    #[error("Could not parse {stage} response ({source}): {preview}")]
    Extraction {
        stage: &'static str,
        #[source]
        source: ExtractionError,
        preview: String,
    },

    #[error("Text generation failed: {0}")]
    Generation(#[from] LlmError),
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Replays canned responses in order and records every prompt it was given.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new<I, S>(responses: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// Queues a backend failure.
        pub fn push_failure(&self, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(LlmError::Api {
                    status: 500,
                    message,
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    /// Seven well-formed questions wrapped in prose and a fence.
    pub fn seven_questions_response() -> String {
        let items: Vec<String> = (1..=7)
            .map(|id| {
                format!(
                    r#"{{"id": {id}, "category": "Category {id}", "content": "Question {id}?", "time_limit_seconds": {}}}"#,
                    60 + id * 10
                )
            })
            .collect();
        format!(
            "Here are the questions:\n```json\n[\n{}\n]\n```\nGood luck!",
            items.join(",\n")
        )
    }

    pub fn evaluation_response(star: [i32; 4], additional: [i32; 4]) -> String {
        format!(
            r#"```json
{{
  "star_score": {{"situation": {}, "task": {}, "action": {}, "result": {}}},
  "additional_score": {{"logic": {}, "specificity": {}, "job_relevance": {}, "time_balance": {}}},
  "strengths": ["Clear context", "Owned the outcome", "Calm delivery"],
  "improvements": ["Quantify the result"],
  "example_answer": "In my last role I..."
}}
```"#,
            star[0],
            star[1],
            star[2],
            star[3],
            additional[0],
            additional[1],
            additional[2],
            additional[3]
        )
    }
}
