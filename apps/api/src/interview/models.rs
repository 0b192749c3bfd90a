//! Interview domain records: questions, answers, scores, and evaluation results.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Suggested answer window when the model omits one.
pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 120;
/// Follow-up window when the model asks a follow-up but omits its budget.
pub const DEFAULT_FOLLOWUP_TIME_LIMIT_SECONDS: u32 = 60;

/// Topic areas the question prompt draws from. The model returns its own
/// label per question; these only feed the prompt's category guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Motivation,
    ProjectExperience,
    Technical,
    Collaboration,
    ProblemSolving,
    FailureRecovery,
    GrowthPotential,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 7] = [
        QuestionCategory::Motivation,
        QuestionCategory::ProjectExperience,
        QuestionCategory::Technical,
        QuestionCategory::Collaboration,
        QuestionCategory::ProblemSolving,
        QuestionCategory::FailureRecovery,
        QuestionCategory::GrowthPotential,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionCategory::Motivation => "Motivation",
            QuestionCategory::ProjectExperience => "Project Experience",
            QuestionCategory::Technical => "Technical Skills",
            QuestionCategory::Collaboration => "Collaboration/Communication",
            QuestionCategory::ProblemSolving => "Problem Solving",
            QuestionCategory::FailureRecovery => "Overcoming Failure",
            QuestionCategory::GrowthPotential => "Growth Potential",
        }
    }

    pub fn guide(self) -> &'static str {
        match self {
            QuestionCategory::Motivation => "interest in and understanding of the role and company",
            QuestionCategory::ProjectExperience => "a project the candidate carried to a successful finish",
            QuestionCategory::Technical => "depth in the technical skills the role needs",
            QuestionCategory::Collaboration => "teamwork and resolving conflict",
            QuestionCategory::ProblemSolving => "working through a difficult situation",
            QuestionCategory::FailureRecovery => "a failure or weakness and how it was overcome",
            QuestionCategory::GrowthPotential => "future plans and drive for self-development",
        }
    }
}

/// A generated interview question. Immutable once parsed; owned by its session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub category: String,
    pub content: String,
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: u32,
}

fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT_SECONDS
}

/// A candidate's answer, supplied by the caller at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub content: String,
    // Accepted from the client for display; scoring relies on the model's time_balance judgement.
    #[allow(dead_code)]
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub followup_question: Option<String>,
    #[serde(default)]
    pub followup_answer: Option<String>,
}

impl Answer {
    /// The follow-up exchange, only when both halves are present.
    pub fn followup_exchange(&self) -> Option<(&str, &str)> {
        match (&self.followup_question, &self.followup_answer) {
            (Some(q), Some(a)) => Some((q.as_str(), a.as_str())),
            _ => None,
        }
    }
}

/// STAR sub-scores, each expected in 1..=10. Values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarScore {
    pub situation: i32,
    pub task: i32,
    pub action: i32,
    pub result: i32,
}

impl StarScore {
    /// Widened so unchecked sub-scores cannot overflow.
    pub fn total(&self) -> i64 {
        [self.situation, self.task, self.action, self.result]
            .into_iter()
            .map(i64::from)
            .sum()
    }
}

/// Non-STAR sub-scores, each expected in 1..=10. Values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalScore {
    pub logic: i32,
    pub specificity: i32,
    pub job_relevance: i32,
    pub time_balance: i32,
}

impl AdditionalScore {
    pub fn total(&self) -> i64 {
        [self.logic, self.specificity, self.job_relevance, self.time_balance]
            .into_iter()
            .map(i64::from)
            .sum()
    }
}

/// Evaluation of one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question_id: u32,
    pub question_content: String,
    pub user_answer: String,
    pub star_score: StarScore,
    pub additional_score: AdditionalScore,
    /// Percentage of the 80-point maximum, one decimal.
    pub total_score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub example_answer: String,
}

/// Whether to ask a follow-up, and what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpDecision {
    #[serde(default)]
    pub has_followup: bool,
    #[serde(default)]
    pub followup_question: Option<String>,
    #[serde(
        default = "default_followup_time_limit",
        deserialize_with = "followup_time_limit_or_default"
    )]
    pub time_limit_seconds: u32,
    /// Internal rationale; not meant for the candidate.
    #[serde(default)]
    pub reason: Option<String>,
}

fn default_followup_time_limit() -> u32 {
    DEFAULT_FOLLOWUP_TIME_LIMIT_SECONDS
}

/// An explicit `null` gets the same default as a missing field.
fn followup_time_limit_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_FOLLOWUP_TIME_LIMIT_SECONDS))
}

impl FollowUpDecision {
    /// Returned when the model's reply cannot be read.
    pub fn parse_failure() -> Self {
        Self {
            has_followup: false,
            followup_question: None,
            time_limit_seconds: 0,
            reason: Some("parse failure".to_string()),
        }
    }
}

/// Letter grade for a session's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Lower bounds are inclusive and checked highest-first.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::S
        } else if score >= 80.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-wide mean of each STAR dimension, one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarAverages {
    pub situation: f64,
    pub task: f64,
    pub action: f64,
    pub result: f64,
}

/// Session-wide mean of each additional dimension, one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdditionalAverages {
    pub logic: f64,
    pub specificity: f64,
    pub job_relevance: f64,
    pub time_balance: f64,
}

/// Overall narrative feedback produced by the summary step.
///
/// `final_advice` is required so an unrelated object in the reply is not
/// mistaken for the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFeedback {
    #[serde(default)]
    pub overall_strengths: Vec<String>,
    #[serde(default)]
    pub overall_improvements: Vec<String>,
    pub final_advice: String,
}

impl SummaryFeedback {
    /// Generic wording used when the summary reply cannot be read.
    pub fn fallback(job_position: &str) -> Self {
        Self {
            overall_strengths: vec!["Your answers were sincere and consistently on topic.".to_string()],
            overall_improvements: vec![
                "Back up your answers with more concrete numbers and examples.".to_string(),
            ],
            final_advice: format!(
                "Build your answers around experiences that connect directly to the {job_position} role."
            ),
        }
    }
}

/// Full result of evaluating a session's answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveEvaluation {
    pub interview_id: String,
    pub job_position: String,
    pub overall_score: f64,
    pub overall_grade: Grade,
    pub star_averages: StarAverages,
    pub additional_averages: AdditionalAverages,
    pub question_feedbacks: Vec<QuestionFeedback>,
    pub overall_strengths: Vec<String>,
    pub overall_improvements: Vec<String>,
    pub final_advice: String,
}
