// src/models/quiz_answer.rs

use std::collections::HashMap;

use sqlx::FromRow;

use crate::error::AppError;
use crate::models::question::QuestionWithChoices;

/// Represents the 'quiz_answers' table in the database.
/// One row per attempt; a user may answer the same quiz many times.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAnswer {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,

    /// Number of questions answered correctly.
    pub score: i64,

    /// Percentage of questions answered correctly.
    pub answer_rate: f64,

    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// A quiz answer joined with the respondent's username, for the information page.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAnswerEntry {
    pub id: i64,
    pub username: String,
    pub score: i64,
    pub answer_rate: f64,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// Represents the 'quiz_information' table in the database.
/// Mean score and mean answer rate over every answer to the quiz.
#[derive(Debug, Clone, FromRow)]
pub struct QuizInformation {
    pub id: i64,
    pub quiz_id: i64,
    pub average_score: f64,
    pub answer_rate: f64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grade {
    pub score: i64,
    pub answer_rate: f64,
}

/// Grades a submission keyed by question id with the selected choice id as value.
///
/// Every question needs a selected choice that belongs to it, otherwise the
/// submission is `NotFound`. A quiz without questions cannot be graded.
pub fn grade(
    questions: &[QuestionWithChoices],
    submitted: &HashMap<String, String>,
) -> Result<Grade, AppError> {
    if questions.is_empty() {
        return Err(AppError::BadRequest("This quiz has no questions yet.".to_string()));
    }

    let mut score = 0;
    for entry in questions {
        let choice_id = submitted
            .get(&entry.question.id.to_string())
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .ok_or_else(|| AppError::NotFound("Choice not found".to_string()))?;

        let choice = entry
            .choices
            .iter()
            .find(|c| c.id == choice_id)
            .ok_or_else(|| AppError::NotFound("Choice not found".to_string()))?;

        if choice.is_answer {
            score += 1;
        }
    }

    let answer_rate = score as f64 * 100.0 / questions.len() as f64;
    Ok(Grade { score, answer_rate })
}
