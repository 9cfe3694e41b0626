// src/repository/sqlite.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::QuizRepository;
use crate::{
    error::AppError,
    models::{
        question::{Choice, Question, QuestionWithChoices},
        quiz::Quiz,
        quiz_answer::{QuizAnswer, QuizAnswerEntry, QuizInformation},
        user::User,
    },
};

/// [`QuizRepository`] over a SQLite pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizRepository for SqliteRepository {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let is_unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if is_unique {
                AppError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_quiz(&self, user_id: i64, title: &str, description: &str) -> Result<Quiz, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (user_id, title, description, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, title, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create quiz: {:?}", e);
            AppError::from(e)
        })?;

        Ok(quiz)
    }

    async fn find_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, user_id, title, description, created_at FROM quizzes WHERE id = ?",
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    async fn list_quizzes_by_owner(&self, user_id: i64) -> Result<Vec<Quiz>, AppError> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, user_id, title, description, created_at
            FROM quizzes
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    async fn list_quizzes_excluding_owner(&self, user_id: i64) -> Result<Vec<Quiz>, AppError> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, user_id, title, description, created_at
            FROM quizzes
            WHERE user_id != ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    async fn count_questions(&self, quiz_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create_question(
        &self,
        quiz_id: i64,
        question: &str,
        choices: &[String],
        answer_index: usize,
    ) -> Result<Question, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (quiz_id, question, created_at)
            VALUES (?, ?, ?)
            RETURNING id, quiz_id, question, created_at
            "#,
        )
        .bind(quiz_id)
        .bind(question)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for (i, choice) in choices.iter().enumerate() {
            sqlx::query("INSERT INTO choices (question_id, choice, is_answer) VALUES (?, ?, ?)")
                .bind(created.id)
                .bind(choice)
                .bind(i == answer_index)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn list_questions_with_choices(&self, quiz_id: i64) -> Result<Vec<QuestionWithChoices>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, quiz_id, question, created_at
            FROM questions
            WHERE quiz_id = ?
            ORDER BY id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT c.id, c.question_id, c.choice, c.is_answer
            FROM choices c
            JOIN questions q ON c.question_id = q.id
            WHERE q.quiz_id = ?
            ORDER BY c.id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: Vec<QuestionWithChoices> = questions
            .into_iter()
            .map(|question| QuestionWithChoices {
                question,
                choices: Vec::new(),
            })
            .collect();

        for choice in choices {
            if let Some(entry) = grouped
                .iter_mut()
                .find(|entry| entry.question.id == choice.question_id)
            {
                entry.choices.push(choice);
            }
        }

        Ok(grouped)
    }

    async fn record_answer(
        &self,
        user_id: i64,
        quiz_id: i64,
        score: i64,
        answer_rate: f64,
    ) -> Result<QuizAnswer, AppError> {
        let now = Utc::now();

        // The insert takes the write lock, so the averages below see every
        // committed answer and no concurrent submission can interleave.
        let mut tx = self.pool.begin().await?;

        let answer = sqlx::query_as::<_, QuizAnswer>(
            r#"
            INSERT INTO quiz_answers (user_id, quiz_id, score, answer_rate, answered_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, quiz_id, score, answer_rate, answered_at
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(score)
        .bind(answer_rate)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let (average_score, average_rate) = sqlx::query_as::<_, (Option<f64>, Option<f64>)>(
            "SELECT AVG(score), AVG(answer_rate) FROM quiz_answers WHERE quiz_id = ?",
        )
        .bind(quiz_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO quiz_information (quiz_id, average_score, answer_rate, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(quiz_id) DO UPDATE SET
                average_score = excluded.average_score,
                answer_rate = excluded.answer_rate,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(quiz_id)
        .bind(average_score.unwrap_or_default())
        .bind(average_rate.unwrap_or_default())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit quiz answer: {:?}", e);
            AppError::from(e)
        })?;

        Ok(answer)
    }

    async fn latest_answer(&self, user_id: i64, quiz_id: i64) -> Result<Option<QuizAnswer>, AppError> {
        let answer = sqlx::query_as::<_, QuizAnswer>(
            r#"
            SELECT id, user_id, quiz_id, score, answer_rate, answered_at
            FROM quiz_answers
            WHERE user_id = ? AND quiz_id = ?
            ORDER BY answered_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    async fn find_quiz_information(&self, quiz_id: i64) -> Result<Option<QuizInformation>, AppError> {
        let information = sqlx::query_as::<_, QuizInformation>(
            r#"
            SELECT id, quiz_id, average_score, answer_rate, updated_at
            FROM quiz_information
            WHERE quiz_id = ?
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(information)
    }

    async fn list_answers(&self, quiz_id: i64) -> Result<Vec<QuizAnswerEntry>, AppError> {
        let answers = sqlx::query_as::<_, QuizAnswerEntry>(
            r#"
            SELECT a.id, u.username, a.score, a.answer_rate, a.answered_at
            FROM quiz_answers a
            JOIN users u ON a.user_id = u.id
            WHERE a.quiz_id = ?
            ORDER BY a.id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }
}
