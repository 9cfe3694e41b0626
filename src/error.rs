// src/error.rs

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::fmt;

use crate::{config::Config, utils::jwt::claims_from_jar, views};

/// Message of a rendered error page, kept in the response extensions so
/// `render_error_pages` can redraw it for the signed-in user.
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
///
/// Form validation failures are not errors: handlers re-render the form instead.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., duplicate username)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Renders an HTML error page with the matching HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let mut response = (status, views::error_page(status, &error_message, None)).into_response();
        response.extensions_mut().insert(ErrorMessage(error_message));
        response
    }
}

/// Axum Middleware: redraws error pages with the navigation of the current session.
///
/// `AppError` has no access to the request, so it renders the anonymous layout;
/// this layer swaps it for the signed-in one when a valid session cookie is present.
pub async fn render_error_pages(
    State(config): State<Config>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    let Some(ErrorMessage(message)) = response.extensions().get::<ErrorMessage>().cloned() else {
        return response;
    };
    match claims_from_jar(&jar, &config) {
        Some(claims) => {
            let status = response.status();
            let mut rendered =
                (status, views::error_page(status, &message, Some(&claims))).into_response();
            rendered.extensions_mut().insert(ErrorMessage(message));
            rendered
        }
        None => response,
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
