// src/repository/mod.rs

//! Persistence boundary. Handlers talk to a [`QuizRepository`] instead of
//! issuing SQL themselves, so every relational traversal is an explicit query.

mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        question::{Question, QuestionWithChoices},
        quiz::Quiz,
        quiz_answer::{QuizAnswer, QuizAnswerEntry, QuizInformation},
        user::User,
    },
};

pub use sqlite::SqliteRepository;

/// Shared handle stored in the application state.
pub type DynRepository = Arc<dyn QuizRepository>;

#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Inserts a user. A taken username yields `AppError::Conflict`.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn create_quiz(&self, user_id: i64, title: &str, description: &str) -> Result<Quiz, AppError>;

    async fn find_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>, AppError>;

    /// Quizzes authored by `user_id`, oldest first.
    async fn list_quizzes_by_owner(&self, user_id: i64) -> Result<Vec<Quiz>, AppError>;

    /// Quizzes authored by anyone but `user_id`, oldest first.
    async fn list_quizzes_excluding_owner(&self, user_id: i64) -> Result<Vec<Quiz>, AppError>;

    async fn count_questions(&self, quiz_id: i64) -> Result<i64, AppError>;

    /// Inserts a question and its choices atomically; only `choices[answer_index]`
    /// is flagged as the answer.
    async fn create_question(
        &self,
        quiz_id: i64,
        question: &str,
        choices: &[String],
        answer_index: usize,
    ) -> Result<Question, AppError>;

    async fn list_questions_with_choices(&self, quiz_id: i64) -> Result<Vec<QuestionWithChoices>, AppError>;

    /// Stores a new attempt and refreshes the quiz aggregate from every stored
    /// attempt, in one transaction.
    async fn record_answer(
        &self,
        user_id: i64,
        quiz_id: i64,
        score: i64,
        answer_rate: f64,
    ) -> Result<QuizAnswer, AppError>;

    /// The user's most recent attempt at the quiz, if any.
    async fn latest_answer(&self, user_id: i64, quiz_id: i64) -> Result<Option<QuizAnswer>, AppError>;

    async fn find_quiz_information(&self, quiz_id: i64) -> Result<Option<QuizInformation>, AppError>;

    /// Every attempt at the quiz by every user, oldest first.
    async fn list_answers(&self, quiz_id: i64) -> Result<Vec<QuizAnswerEntry>, AppError>;
}
