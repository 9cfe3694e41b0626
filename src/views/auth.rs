// src/views/auth.rs

use maud::{Markup, html};

use super::{field_errors, layout, non_field_errors};
use crate::utils::form::FormErrors;

pub fn signup(username: &str, errors: &FormErrors) -> Markup {
    layout(
        "Sign up",
        None,
        html! {
            form method="post" action="/signup" {
                (non_field_errors(errors))
                p {
                    label for="username" { "Username" }
                    input id="username" type="text" name="username" value=(username) maxlength="150" autofocus required;
                    (field_errors(errors, "username"))
                }
                p {
                    label for="password1" { "Password" }
                    input id="password1" type="password" name="password1" autocomplete="new-password" required;
                    (field_errors(errors, "password1"))
                }
                p {
                    label for="password2" { "Password confirmation" }
                    input id="password2" type="password" name="password2" autocomplete="new-password" required;
                    (field_errors(errors, "password2"))
                }
                button type="submit" { "Sign up" }
            }
            p { "Already registered? " a href="/login" { "Log in" } }
        },
    )
}

pub fn login(username: &str, next: Option<&str>, errors: &FormErrors) -> Markup {
    layout(
        "Log in",
        None,
        html! {
            form method="post" action="/login" {
                (non_field_errors(errors))
                p {
                    label for="username" { "Username" }
                    input id="username" type="text" name="username" value=(username) placeholder="Username" autofocus required;
                    (field_errors(errors, "username"))
                }
                p {
                    label for="password" { "Password" }
                    input id="password" type="password" name="password" placeholder="Password" autocomplete="current-password" required;
                    (field_errors(errors, "password"))
                }
                @if let Some(next) = next {
                    input type="hidden" name="next" value=(next);
                }
                button type="submit" { "Log in" }
            }
            p { "No account yet? " a href="/signup" { "Sign up" } }
        },
    )
}
