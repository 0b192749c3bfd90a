// Prompt templates for the interview flows.
// Placeholders are `{name}` and are filled by `llm_client::prompts::render_template`.

use crate::interview::models::{
    AdditionalAverages, Answer, Question, QuestionCategory, QuestionFeedback, StarAverages,
};
use crate::llm_client::prompts::{render_template, JSON_OUTPUT_INSTRUCTION, NO_FRAMEWORK_NAMING};

/// Number of questions requested per interview.
pub const QUESTION_COUNT: usize = 7;

/// Question generation. Replace: {job_position}, {question_count}, {category_guide},
/// {no_framework_naming}, {resume_text}, {json_output}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an interviewer hiring for the {job_position} position.
Read the self-introduction below and write {question_count} in-depth questions you would actually ask in this interview.

## Rules
1. Produce exactly {question_count} questions, each from a different topic/category.
2. Refer to specific content from the self-introduction in every question.
3. Ask naturally about concrete experiences: the situation, what the candidate did, and how it turned out.
4. Ask open questions that call for a spoken, narrative answer, never a one-word reply.
5. {no_framework_naming}

## Category guide
Pick the categories that best fit the self-introduction:
{category_guide}

## Answer time
Give each question a suggested answer time in seconds:
- Simple fact/opinion questions (e.g. motivation, aspirations): 60-90
- Experience-based questions that need a concrete situation: 120-150
- Compound questions (several steps, a problem-solving process): 150-180

## Self-introduction
{resume_text}

## Position
{job_position}

## Output format
```json
[
  {"id": 1, "category": "Category name", "content": "Question text...", "time_limit_seconds": 90},
  {"id": 2, "category": "Category name", "content": "Question text...", "time_limit_seconds": 150},
  {"id": 3, "category": "Category name", "content": "Question text...", "time_limit_seconds": 120},
  {"id": 4, "category": "Category name", "content": "Question text...", "time_limit_seconds": 150},
  {"id": 5, "category": "Category name", "content": "Question text...", "time_limit_seconds": 180},
  {"id": 6, "category": "Category name", "content": "Question text...", "time_limit_seconds": 120},
  {"id": 7, "category": "Category name", "content": "Question text...", "time_limit_seconds": 90}
]
```
{json_output}"#;

/// Follow-up decision. Replace: {job_position}, {category}, {question}, {answer},
/// {no_framework_naming}, {json_output}
pub const FOLLOWUP_PROMPT_TEMPLATE: &str = r#"You are an interviewer hiring for the {job_position} position.
Analyse the candidate's answer and, only if it is needed, write one follow-up question.

## Ask a follow-up when
1. The answer is too short or abstract (ask for a concrete example).
2. Claims are made without evidence or examples.
3. An experience is mentioned but the candidate's own role is unclear.
4. Results or outcomes are given without concrete numbers.
5. Something interesting was said that is worth digging into.

## No follow-up when
1. The answer is already concrete and complete.
2. The situation, the task, the actions taken, and the result are all clearly covered.

## Original question
Category: {category}
Question: {question}

## Candidate's answer
{answer}

## Rules
- Set "has_followup" to true if a follow-up is needed, false otherwise.
- The follow-up must be exploratory, not confrontational (e.g. "Could you tell me a bit more about that part?").
- {no_framework_naming}

## Output format
```json
{
  "has_followup": true,
  "followup_question": "Follow-up question...",
  "time_limit_seconds": 60,
  "reason": "Why a follow-up is needed (internal, never shown to the candidate)"
}
```

Or, when no follow-up is needed:
```json
{
  "has_followup": false,
  "followup_question": null,
  "time_limit_seconds": 0,
  "reason": "The answer is already specific."
}
```
{json_output}"#;

/// Single-answer evaluation. Replace: {job_position}, {category}, {question},
/// {answer}, {followup_section}, {json_output}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an expert interview evaluator hiring for the {job_position} position.
Evaluate the interview question and the candidate's answer below in detail using the STAR criteria.
If a follow-up question and answer are included, take them into account as part of one overall evaluation.

## Criteria (each scored 1-10)

### STAR
- Situation: how clearly the situation and background are explained
- Task: how clearly the candidate's own role and goal are defined
- Action: how concrete and detailed the actions and effort are
- Result: how specific the outcome and the lessons learned are

### Additional
- Logic: logical flow and consistency of the answer's structure
- Specificity: concrete numbers, cases, and examples (check whether the follow-up filled gaps)
- Job relevance: connection to the {job_position} role
- Time balance: appropriate answer length (ideal: 1-2 minutes)

## Question
Category: {category}
Question: {question}

## Candidate's answer
{answer}
{followup_section}
## Output format
```json
{
  "star_score": {
    "situation": 7,
    "task": 6,
    "action": 8,
    "result": 5
  },
  "additional_score": {
    "logic": 7,
    "specificity": 6,
    "job_relevance": 8,
    "time_balance": 7
  },
  "strengths": [
    "Strength 1",
    "Strength 2"
  ],
  "improvements": [
    "Improvement 1",
    "Improvement 2"
  ],
  "example_answer": "A model answer to this question (around 200 characters)"
}
```
{json_output}"#;

/// Follow-up evidence block for the evaluation prompt. Replace: {followup_question}, {followup_answer}
pub const FOLLOWUP_SECTION_TEMPLATE: &str = r#"
### Follow-up question and answer
Follow-up question: {followup_question}
Follow-up answer: {followup_answer}
"#;

/// Cross-question summary. Replace: {job_position}, {question_count}, {overall_score},
/// {situation}, {task}, {action}, {result}, {logic}, {specificity}, {job_relevance},
/// {time_balance}, {feedback_summary}, {json_output}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"You are an expert interview evaluator hiring for the {job_position} position.
Combine the evaluation results of the candidate's {question_count} interview answers into final feedback.

## Results
- Overall score: {overall_score}

### STAR averages
- Situation: {situation} / Task: {task} / Action: {action} / Result: {result}

### Additional averages
- Logic: {logic} / Specificity: {specificity} / Job relevance: {job_relevance} / Time balance: {time_balance}

### Per-question summary
{feedback_summary}

## Output format
```json
{
  "overall_strengths": ["Overall strength 1", "Overall strength 2", "Overall strength 3"],
  "overall_improvements": ["Overall improvement 1 (with a concrete method)", "Overall improvement 2", "Overall improvement 3"],
  "final_advice": "About 200 characters of overall advice for preparing for the {job_position} role"
}
```
{json_output}"#;

pub fn build_question_prompt(resume_text: &str, job_position: &str) -> String {
    let category_guide = QuestionCategory::ALL
        .iter()
        .map(|c| format!("- {}: {}", c.label(), c.guide()))
        .collect::<Vec<_>>()
        .join("\n");
    let question_count = QUESTION_COUNT.to_string();

    render_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("job_position", job_position),
            ("question_count", &question_count),
            ("category_guide", &category_guide),
            ("no_framework_naming", NO_FRAMEWORK_NAMING),
            ("resume_text", resume_text),
            ("json_output", JSON_OUTPUT_INSTRUCTION),
        ],
    )
}

pub fn build_followup_prompt(question: &Question, answer: &Answer, job_position: &str) -> String {
    render_template(
        FOLLOWUP_PROMPT_TEMPLATE,
        &[
            ("job_position", job_position),
            ("category", &question.category),
            ("question", &question.content),
            ("answer", &answer.content),
            ("no_framework_naming", NO_FRAMEWORK_NAMING),
            ("json_output", JSON_OUTPUT_INSTRUCTION),
        ],
    )
}

pub fn build_evaluation_prompt(question: &Question, answer: &Answer, job_position: &str) -> String {
    let followup_section = answer
        .followup_exchange()
        .map(|(followup_question, followup_answer)| {
            render_template(
                FOLLOWUP_SECTION_TEMPLATE,
                &[
                    ("followup_question", followup_question),
                    ("followup_answer", followup_answer),
                ],
            )
        })
        .unwrap_or_default();

    render_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("job_position", job_position),
            ("category", &question.category),
            ("question", &question.content),
            ("answer", &answer.content),
            ("followup_section", &followup_section),
            ("json_output", JSON_OUTPUT_INSTRUCTION),
        ],
    )
}

pub fn build_summary_prompt(
    job_position: &str,
    feedbacks: &[QuestionFeedback],
    star_avg: &StarAverages,
    add_avg: &AdditionalAverages,
    overall_score: f64,
) -> String {
    let feedback_summary = feedbacks
        .iter()
        .map(summary_line)
        .collect::<Vec<_>>()
        .join("\n");

    let question_count = feedbacks.len().to_string();
    let overall_score = overall_score.to_string();
    let situation = star_avg.situation.to_string();
    let task = star_avg.task.to_string();
    let action = star_avg.action.to_string();
    let result = star_avg.result.to_string();
    let logic = add_avg.logic.to_string();
    let specificity = add_avg.specificity.to_string();
    let job_relevance = add_avg.job_relevance.to_string();
    let time_balance = add_avg.time_balance.to_string();

    render_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("job_position", job_position),
            ("question_count", &question_count),
            ("overall_score", &overall_score),
            ("situation", &situation),
            ("task", &task),
            ("action", &action),
            ("result", &result),
            ("logic", &logic),
            ("specificity", &specificity),
            ("job_relevance", &job_relevance),
            ("time_balance", &time_balance),
            ("feedback_summary", &feedback_summary),
            ("json_output", JSON_OUTPUT_INSTRUCTION),
        ],
    )
}

/// One condensed line per question: score plus its top two strengths and improvements.
fn summary_line(feedback: &QuestionFeedback) -> String {
    let strengths = top_two(&feedback.strengths, "no strengths noted");
    let improvements = top_two(&feedback.improvements, "no improvements noted");
    format!(
        "Q{}. Score: {}, Strengths: {}, Improvements: {}",
        feedback.question_id, feedback.total_score, strengths, improvements
    )
}

fn top_two(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
    }
}
