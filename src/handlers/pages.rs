// src/handlers/pages.rs

use maud::Markup;

use crate::{error::AppError, utils::jwt::CurrentUser, views};

/// Landing page. Public; greets the user when a session is present.
pub async fn index(CurrentUser(user): CurrentUser) -> Markup {
    views::index(user.as_ref())
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
