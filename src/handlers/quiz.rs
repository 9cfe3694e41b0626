// src/handlers/quiz.rs

use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;

use crate::{
    error::AppError,
    models::quiz::{Quiz, QuizForm, QuizListParams, keyword_terms},
    repository::DynRepository,
    utils::{form::FormErrors, jwt::Claims},
    views,
};

/// Loads a quiz or fails with `NotFound`.
pub(crate) async fn find_quiz_or_404(repo: &DynRepository, quiz_id: i64) -> Result<Quiz, AppError> {
    repo.find_quiz(quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))
}

/// Dashboard: the quizzes written by the current user.
pub async fn home(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<Markup, AppError> {
    let quizzes = repo.list_quizzes_by_owner(claims.user_id()?).await?;
    Ok(views::quiz::home(&claims, &quizzes))
}

pub async fn create_quiz_form(Extension(claims): Extension<Claims>) -> Markup {
    views::quiz::create_quiz(&claims, &QuizForm::default(), &FormErrors::new())
}

/// Creates a quiz owned by the current user, then moves on to adding its questions.
pub async fn create_quiz(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Form(mut payload): Form<QuizForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = payload.clean() {
        return Ok(views::quiz::create_quiz(&claims, &payload, &errors).into_response());
    }

    let quiz = repo
        .create_quiz(claims.user_id()?, &payload.title, &payload.description)
        .await?;

    tracing::info!("Quiz {} created by {}", quiz.id, claims.username);

    Ok(Redirect::to(&format!("/quiz/{}/question/create", quiz.id)).into_response())
}

/// Quizzes the current user can answer, i.e. written by someone else.
///
/// `keyword` is split on whitespace; a quiz is kept when every term appears in
/// its title or description, ignoring case.
pub async fn list_quizzes(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<QuizListParams>,
) -> Result<Markup, AppError> {
    let terms = keyword_terms(params.keyword.as_deref());

    let quizzes: Vec<Quiz> = repo
        .list_quizzes_excluding_owner(claims.user_id()?)
        .await?
        .into_iter()
        .filter(|quiz| quiz.matches_keywords(&terms))
        .collect();

    Ok(views::quiz::quiz_list(
        &claims,
        &quizzes,
        params.keyword.as_deref().unwrap_or(""),
    ))
}

/// Aggregate statistics of a quiz plus every individual answer.
/// 404 until somebody has answered it.
pub async fn quiz_information(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<Markup, AppError> {
    let quiz = find_quiz_or_404(&repo, quiz_id).await?;

    let information = repo
        .find_quiz_information(quiz.id)
        .await?
        .ok_or(AppError::NotFound("Nobody has answered this quiz yet".to_string()))?;

    let answers = repo.list_answers(quiz.id).await?;

    Ok(views::quiz::information(&claims, &quiz, &information, &answers))
}
