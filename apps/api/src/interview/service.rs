//! Interview service: the public entry point tying flows to the session store.

use std::sync::Arc;

use tracing::info;

use crate::interview::evaluation::{build_comprehensive_evaluation, evaluate_answer};
use crate::interview::followup::decide_followup;
use crate::interview::models::{Answer, ComprehensiveEvaluation, FollowUpDecision, Question};
use crate::interview::questions::generate_question_set;
use crate::interview::session::{Session, SessionStore};
use crate::interview::InterviewError;
use crate::llm_client::TextGenerator;

pub struct InterviewService {
    llm: Arc<dyn TextGenerator>,
    sessions: SessionStore,
}

impl InterviewService {
    pub fn new(llm: Arc<dyn TextGenerator>, sessions: SessionStore) -> Self {
        Self { llm, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Generates the question set and opens a session for it.
    pub async fn generate_questions(
        &self,
        resume_text: &str,
        job_position: &str,
    ) -> Result<Arc<Session>, InterviewError> {
        let questions = generate_question_set(self.llm.as_ref(), resume_text, job_position).await?;
        let session = self
            .sessions
            .insert(Session::new(job_position, resume_text, questions))
            .await;
        info!("Opened interview session {}", session.id);
        Ok(session)
    }

    /// Decides whether `answer` warrants a follow-up. Does not touch the session.
    pub async fn generate_followup_question(
        &self,
        interview_id: &str,
        question: &Question,
        answer: &Answer,
    ) -> Result<FollowUpDecision, InterviewError> {
        let session = self.session(interview_id).await?;
        let decision =
            decide_followup(self.llm.as_ref(), question, answer, &session.job_position).await?;
        Ok(decision)
    }

    /// Evaluates every answer against its session question, then aggregates.
    ///
    /// Checked in order: unknown session, empty answer list, unmatched answers.
    /// All three fail before any model call.
    pub async fn evaluate_answers(
        &self,
        interview_id: &str,
        answers: &[Answer],
    ) -> Result<ComprehensiveEvaluation, InterviewError> {
        let session = self.session(interview_id).await?;
        if answers.is_empty() {
            return Err(InterviewError::EmptyAnswers);
        }

        let pairs = answers
            .iter()
            .map(|answer| {
                session
                    .question(answer.question_id)
                    .map(|question| (question, answer))
                    .ok_or_else(|| InterviewError::UnmatchedAnswer {
                        session_id: session.id.clone(),
                        question_id: answer.question_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut feedbacks = Vec::with_capacity(pairs.len());
        for (question, answer) in pairs {
            let feedback =
                evaluate_answer(self.llm.as_ref(), question, answer, &session.job_position).await?;
            feedbacks.push(feedback);
        }

        build_comprehensive_evaluation(
            self.llm.as_ref(),
            &session.id,
            &session.job_position,
            feedbacks,
        )
        .await
    }

    /// Drops a session. Fails if it was unknown or already expired.
    pub async fn close_session(&self, interview_id: &str) -> Result<(), InterviewError> {
        if self.sessions.remove(interview_id).await {
            info!("Closed interview session {interview_id}");
            Ok(())
        } else {
            Err(InterviewError::UnknownSession(interview_id.to_string()))
        }
    }

    async fn session(&self, interview_id: &str) -> Result<Arc<Session>, InterviewError> {
        self.sessions
            .get(interview_id)
            .await
            .ok_or_else(|| InterviewError::UnknownSession(interview_id.to_string()))
    }
}
