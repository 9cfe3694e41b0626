// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::utils::form::{self, FormErrors};

/// Letters, digits and `@ . + - _`.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    pub password: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Signup form. `password2` repeats `password1`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password length must be between 8 and 128 characters."
    ))]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    /// Trims the username and runs every field rule, including the password match.
    pub fn clean(&mut self) -> Result<(), FormErrors> {
        self.username = self.username.trim().to_string();

        let mut errors = match self.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => form::collect_errors(&e),
        };
        if self.password2.is_empty() {
            form::push_error(&mut errors, "password2", "This field is required.");
        } else if self.password1 != self.password2 {
            form::push_error(&mut errors, "password2", "The two password fields didn't match.");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Login form. `next` is the page the user was sent away from.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = form::not_blank))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    pub next: Option<String>,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(form::required());
    }
    if username.chars().count() > 150 {
        return Err(ValidationError::new("username_too_long")
            .with_message("Username must be 150 characters or fewer.".into()));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::new("username_invalid").with_message(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        ));
    }
    Ok(())
}
