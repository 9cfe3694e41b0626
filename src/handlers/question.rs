// src/handlers/question.rs

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::Markup;

use super::quiz::find_quiz_or_404;
use crate::{
    error::AppError,
    models::question::QuestionForm,
    repository::DynRepository,
    utils::{form::FormErrors, jwt::Claims},
    views,
};

pub async fn create_question_form(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<Markup, AppError> {
    let quiz = find_quiz_or_404(&repo, quiz_id).await?;
    let next_question_num = repo.count_questions(quiz.id).await? + 1;

    Ok(views::quiz::create_question(
        &claims,
        &quiz,
        next_question_num,
        &QuestionForm::default(),
        &FormErrors::new(),
    ))
}

/// Adds one question with its four choices to a quiz.
///
/// Redirects back to this same page so the author can keep adding questions.
/// `choice` is a repeated field, hence the `axum_extra` form extractor.
pub async fn create_question(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
    Form(mut payload): Form<QuestionForm>,
) -> Result<Response, AppError> {
    let quiz = find_quiz_or_404(&repo, quiz_id).await?;

    if let Err(errors) = payload.clean() {
        let next_question_num = repo.count_questions(quiz.id).await? + 1;
        return Ok(
            views::quiz::create_question(&claims, &quiz, next_question_num, &payload, &errors)
                .into_response(),
        );
    }

    let answer_index = payload
        .answer_index()
        .ok_or(AppError::BadRequest("Select the correct choice".to_string()))?;

    let question = repo
        .create_question(quiz.id, &payload.question, &payload.choice, answer_index)
        .await?;

    tracing::info!("Question {} added to quiz {} by {}", question.id, quiz.id, claims.username);

    Ok(Redirect::to(&format!("/quiz/{}/question/create", quiz.id)).into_response())
}
