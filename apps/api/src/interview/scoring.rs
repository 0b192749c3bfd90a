//! Score aggregation: per-answer percentage, session averages, and grade.

use crate::interview::models::{
    AdditionalAverages, AdditionalScore, Grade, QuestionFeedback, StarAverages, StarScore,
};

/// Eight sub-scores at 10 points each.
const MAX_RAW_SCORE: f64 = 80.0;

/// Session-level numbers derived from the per-answer feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub overall_score: f64,
    pub overall_grade: Grade,
    pub star_averages: StarAverages,
    pub additional_averages: AdditionalAverages,
}

/// Rounds to one decimal place. Exact ties go to the even digit, so 63.75
/// becomes 63.8 and 72.25 becomes 72.2.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Percentage of the 80-point maximum, one decimal.
pub fn total_score(star: &StarScore, additional: &AdditionalScore) -> f64 {
    let raw = (star.total() + additional.total()) as f64;
    round1(raw * 100.0 / MAX_RAW_SCORE)
}

/// Aggregates feedback into overall score, grade, and per-dimension averages.
/// Returns `None` for an empty slice.
pub fn summarize_scores(feedbacks: &[QuestionFeedback]) -> Option<ScoreSummary> {
    if feedbacks.is_empty() {
        return None;
    }

    let mean = |value: fn(&QuestionFeedback) -> f64| mean_of(feedbacks, value);

    let overall_score = mean(|f| f.total_score);

    Some(ScoreSummary {
        overall_score,
        overall_grade: Grade::from_score(overall_score),
        star_averages: StarAverages {
            situation: mean(|f| f.star_score.situation as f64),
            task: mean(|f| f.star_score.task as f64),
            action: mean(|f| f.star_score.action as f64),
            result: mean(|f| f.star_score.result as f64),
        },
        additional_averages: AdditionalAverages {
            logic: mean(|f| f.additional_score.logic as f64),
            specificity: mean(|f| f.additional_score.specificity as f64),
            job_relevance: mean(|f| f.additional_score.job_relevance as f64),
            time_balance: mean(|f| f.additional_score.time_balance as f64),
        },
    })
}

fn mean_of(feedbacks: &[QuestionFeedback], value: fn(&QuestionFeedback) -> f64) -> f64 {
    round1(feedbacks.iter().map(value).sum::<f64>() / feedbacks.len() as f64)
}
