// src/views/mod.rs

//! Server-rendered pages. Each function returns `Markup`, which axum sends as
//! `text/html`.

pub mod answer;
pub mod auth;
pub mod quiz;

use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::utils::{
    form::{FormErrors, NON_FIELD_ERRORS},
    jwt::Claims,
};

/// Wraps page content in the shared document shell and navigation bar.
pub fn layout(title: &str, user: Option<&Claims>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Quiz" }
                link rel="stylesheet" href="/static/style.css";
            }
            body {
                nav {
                    a href="/" { "Quiz" }
                    @if let Some(user) = user {
                        a href="/home" { "My quizzes" }
                        a href="/quiz/create" { "Create a quiz" }
                        a href="/quizzes" { "Answer quizzes" }
                        form method="post" action="/logout" {
                            span { (user.username) " " }
                            button type="submit" { "Log out" }
                        }
                    } @else {
                        a href="/login" { "Log in" }
                        a href="/signup" { "Sign up" }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

/// Messages attached to `field`, if any.
pub fn field_errors(errors: &FormErrors, field: &str) -> Markup {
    html! {
        @if let Some(messages) = errors.get(field) {
            ul.errorlist {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}

pub fn non_field_errors(errors: &FormErrors) -> Markup {
    field_errors(errors, NON_FIELD_ERRORS)
}

pub fn index(user: Option<&Claims>) -> Markup {
    layout(
        "Welcome",
        user,
        html! {
            p { "Write multiple-choice quizzes, answer quizzes written by others, and see how everyone did." }
            @if let Some(user) = user {
                p { "Signed in as " strong { (user.username) } "." }
                p { a href="/home" { "Go to your quizzes" } }
            } @else {
                p {
                    a href="/signup" { "Create an account" }
                    " or "
                    a href="/login" { "log in" }
                    " to get started."
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str, user: Option<&Claims>) -> Markup {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        user,
        html! {
            p { (status.as_u16()) ": " (message) }
            p { a href="/" { "Back to the start page" } }
        },
    )
}
