// src/models/quiz.rs

use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use crate::utils::form::{self, FormErrors};

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Quiz {
    pub id: i64,

    /// Author of the quiz.
    pub user_id: i64,

    pub title: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Quiz {
    /// True when every term occurs in the title or in the description.
    /// Terms must already be lowercased, see [`keyword_terms`].
    pub fn matches_keywords(&self, terms: &[String]) -> bool {
        let title = self.title.to_lowercase();
        let description = self.description.to_lowercase();
        terms
            .iter()
            .all(|term| title.contains(term.as_str()) || description.contains(term.as_str()))
    }
}

/// Splits a free-text search on whitespace into lowercased terms.
pub fn keyword_terms(keyword: Option<&str>) -> Vec<String> {
    keyword
        .map(|k| k.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default()
}

/// DTO for creating a new quiz.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuizForm {
    #[serde(default)]
    #[validate(
        custom(function = form::not_blank),
        length(max = 200, message = "Title must be 200 characters or fewer.")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(
        custom(function = form::not_blank),
        length(max = 1000, message = "Description must be 1000 characters or fewer.")
    )]
    pub description: String,
}

impl QuizForm {
    pub fn clean(&mut self) -> Result<(), FormErrors> {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.validate().map_err(|e| form::collect_errors(&e))
    }
}

/// Query string of the answerable quiz list.
#[derive(Debug, Default, Deserialize)]
pub struct QuizListParams {
    pub keyword: Option<String>,
}
