// src/handlers/answer.rs

use std::collections::HashMap;

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;

use super::quiz::find_quiz_or_404;
use crate::{
    error::AppError,
    models::quiz_answer::grade,
    repository::DynRepository,
    utils::jwt::Claims,
    views,
};

/// Shows every question of the quiz with its choices.
pub async fn answer_quiz_form(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<Markup, AppError> {
    let quiz = find_quiz_or_404(&repo, quiz_id).await?;
    let questions = repo.list_questions_with_choices(quiz.id).await?;

    Ok(views::answer::answer_quiz(&claims, &quiz, &questions))
}

/// Grades a submission and records it.
///
/// * The form maps each question id to the chosen choice id.
/// * One point per correct choice; the answer rate is the percentage of questions right.
/// * Stores the attempt and refreshes the quiz averages, then shows the result.
pub async fn answer_quiz(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
    Form(submitted): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let quiz = find_quiz_or_404(&repo, quiz_id).await?;
    let questions = repo.list_questions_with_choices(quiz.id).await?;

    let result = grade(&questions, &submitted)?;

    let answer = repo
        .record_answer(claims.user_id()?, quiz.id, result.score, result.answer_rate)
        .await?;

    tracing::info!(
        "Quiz {} answered by {}: score {} ({:.1}%)",
        quiz.id,
        claims.username,
        answer.score,
        answer.answer_rate
    );

    Ok(Redirect::to(&format!("/quiz/{}/result", quiz.id)).into_response())
}

/// The current user's latest attempt at the quiz, or an empty state.
pub async fn result(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<Markup, AppError> {
    let quiz = find_quiz_or_404(&repo, quiz_id).await?;
    let answer = repo.latest_answer(claims.user_id()?, quiz.id).await?;

    Ok(views::answer::result(&claims, &quiz, answer.as_ref()))
}
