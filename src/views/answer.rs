// src/views/answer.rs

use maud::{Markup, html};

use super::layout;
use crate::{
    models::{question::QuestionWithChoices, quiz::Quiz, quiz_answer::QuizAnswer},
    utils::jwt::Claims,
};

pub fn answer_quiz(user: &Claims, quiz: &Quiz, questions: &[QuestionWithChoices]) -> Markup {
    layout(
        &quiz.title,
        Some(user),
        html! {
            p { (quiz.description) }
            @if questions.is_empty() {
                p { "This quiz has no questions yet." }
            } @else {
                form method="post" action=(format!("/quiz/{}/answer", quiz.id)) {
                    @for (n, entry) in questions.iter().enumerate() {
                        fieldset {
                            legend { "Q" (n + 1) ". " (entry.question.question) }
                            @for choice in &entry.choices {
                                p {
                                    label {
                                        input type="radio" name=(entry.question.id) value=(choice.id) required;
                                        " " (choice.choice)
                                    }
                                }
                            }
                        }
                    }
                    button type="submit" { "Submit answers" }
                }
            }
        },
    )
}

pub fn result(user: &Claims, quiz: &Quiz, answer: Option<&QuizAnswer>) -> Markup {
    layout(
        &format!("Result for \"{}\"", quiz.title),
        Some(user),
        html! {
            @if let Some(answer) = answer {
                p { "Score: " strong { (answer.score) } }
                p { "Answer rate: " strong { (format!("{:.1}%", answer.answer_rate)) } }
            } @else {
                p { "You have not answered this quiz yet." }
                p { a href=(format!("/quiz/{}/answer", quiz.id)) { "Answer it now" } }
            }
            p { a href="/quizzes" { "Back to the quiz list" } }
        },
    )
}
