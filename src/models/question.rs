// src/models/question.rs

use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::utils::form::{self, FormErrors};

/// Every question carries exactly this many choices.
pub const CHOICES_PER_QUESTION: usize = 4;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,

    /// The text of the question.
    pub question: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Represents the 'choices' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice: String,

    /// Set on exactly one choice of each question.
    pub is_answer: bool,
}

/// A question together with its choices, in insertion order.
#[derive(Debug, Clone)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

/// DTO for creating a question with its four choices.
///
/// `choice` is submitted four times; `is_answer` is the 0-based index of the correct one.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuestionForm {
    #[serde(default)]
    #[validate(
        custom(function = form::not_blank),
        length(max = 1000, message = "Question must be 1000 characters or fewer.")
    )]
    pub question: String,
    #[serde(default)]
    #[validate(custom(function = validate_choices))]
    pub choice: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = validate_answer_index))]
    pub is_answer: String,
}

impl QuestionForm {
    pub fn clean(&mut self) -> Result<(), FormErrors> {
        self.question = self.question.trim().to_string();
        for choice in self.choice.iter_mut() {
            *choice = choice.trim().to_string();
        }
        self.validate().map_err(|e| form::collect_errors(&e))
    }

    /// Index of the correct choice, once the form has been validated.
    pub fn answer_index(&self) -> Option<usize> {
        parse_answer_index(&self.is_answer)
    }

    /// Submitted text of choice `index`, empty when absent.
    pub fn choice_text(&self, index: usize) -> &str {
        self.choice.get(index).map(String::as_str).unwrap_or("")
    }
}

fn parse_answer_index(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|i| *i < CHOICES_PER_QUESTION)
}

fn validate_choices(choices: &[String]) -> Result<(), ValidationError> {
    if choices.len() != CHOICES_PER_QUESTION {
        return Err(ValidationError::new("choices_count")
            .with_message("Enter exactly four choices.".into()));
    }
    for choice in choices {
        if choice.trim().is_empty() {
            return Err(ValidationError::new("choice_blank")
                .with_message("Every choice needs some text.".into()));
        }
        if choice.chars().count() > 500 {
            return Err(ValidationError::new("choice_too_long")
                .with_message("Choices must be 500 characters or fewer.".into()));
        }
    }
    Ok(())
}

fn validate_answer_index(value: &str) -> Result<(), ValidationError> {
    match parse_answer_index(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("answer_index")
            .with_message("Select the correct choice.".into())),
    }
}
