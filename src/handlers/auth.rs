// src/handlers/auth.rs

use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginForm, LoginParams, SignupForm},
    repository::DynRepository,
    utils::{
        form::{self, FormErrors, NON_FIELD_ERRORS},
        hash::{hash_password, verify_password},
        jwt::{end_session, safe_next, start_session},
    },
    views,
};

/// Where a successful login lands when no `next` page was requested.
const LOGIN_REDIRECT: &str = "/home";

pub async fn signup_form() -> Markup {
    views::auth::signup("", &FormErrors::new())
}

/// Registers a new user and signs them in.
///
/// Hashes the password using Argon2 before storing it, then starts a session
/// and redirects to the landing page. Invalid input re-renders the form.
pub async fn signup(
    State(repo): State<DynRepository>,
    State(config): State<Config>,
    jar: CookieJar,
    Form(mut payload): Form<SignupForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = payload.clean() {
        return Ok(views::auth::signup(&payload.username, &errors).into_response());
    }

    let hashed_password = hash_password(&payload.password1)?;

    let user = match repo.create_user(&payload.username, &hashed_password).await {
        Ok(user) => user,
        Err(AppError::Conflict(_)) => {
            let mut errors = FormErrors::new();
            form::push_error(&mut errors, "username", "A user with that username already exists.");
            return Ok(views::auth::signup(&payload.username, &errors).into_response());
        }
        Err(e) => return Err(e),
    };

    tracing::info!("User signed up: {}", user.username);

    let jar = start_session(jar, user.id, &user.username, &config)?;
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn login_form(Query(params): Query<LoginParams>) -> Markup {
    views::auth::login("", safe_next(params.next.as_deref()), &FormErrors::new())
}

/// Authenticates a user and starts a session.
///
/// Verifies the username and password against the database. On success the
/// session cookie is set and the user is sent to `next` (if local) or home.
pub async fn login(
    State(repo): State<DynRepository>,
    State(config): State<Config>,
    jar: CookieJar,
    Form(payload): Form<LoginForm>,
) -> Result<Response, AppError> {
    let next = safe_next(payload.next.as_deref());
    let username = payload.username.trim();

    if let Err(validation_errors) = payload.validate() {
        let errors = form::collect_errors(&validation_errors);
        return Ok(views::auth::login(username, next, &errors).into_response());
    }

    let user = match repo.find_user_by_username(username).await? {
        Some(user) if verify_password(&payload.password, &user.password)? => user,
        _ => {
            tracing::info!("Failed login attempt for {}", username);
            let mut errors = FormErrors::new();
            form::push_error(
                &mut errors,
                NON_FIELD_ERRORS,
                "Please enter a correct username and password. Note that both fields may be case-sensitive.",
            );
            return Ok(views::auth::login(username, next, &errors).into_response());
        }
    };

    let jar = start_session(jar, user.id, &user.username, &config)?;
    Ok((jar, Redirect::to(next.unwrap_or(LOGIN_REDIRECT))).into_response())
}

/// Ends the session and returns to the landing page.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (end_session(jar), Redirect::to("/"))
}
