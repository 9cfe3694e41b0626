// src/views/quiz.rs

use maud::{Markup, html};

use super::{field_errors, layout};
use crate::{
    models::{
        question::{CHOICES_PER_QUESTION, QuestionForm},
        quiz::{Quiz, QuizForm},
        quiz_answer::{QuizAnswerEntry, QuizInformation},
    },
    utils::{form::FormErrors, jwt::Claims},
};

pub fn home(user: &Claims, quizzes: &[Quiz]) -> Markup {
    layout(
        "My quizzes",
        Some(user),
        html! {
            p { a href="/quiz/create" { "Create a new quiz" } }
            @if quizzes.is_empty() {
                p { "You have not written any quizzes yet." }
            } @else {
                ul {
                    @for quiz in quizzes {
                        li {
                            strong { (quiz.title) }
                            " "
                            a href=(format!("/quiz/{}/question/create", quiz.id)) { "Add questions" }
                            " "
                            a href=(format!("/quiz/{}/info", quiz.id)) { "Statistics" }
                        }
                    }
                }
            }
        },
    )
}

pub fn create_quiz(user: &Claims, form: &QuizForm, errors: &FormErrors) -> Markup {
    layout(
        "Create a quiz",
        Some(user),
        html! {
            form method="post" action="/quiz/create" {
                p {
                    label for="title" { "Title" }
                    input id="title" type="text" name="title" value=(form.title) maxlength="200" required;
                    (field_errors(errors, "title"))
                }
                p {
                    label for="description" { "Description" }
                    textarea id="description" name="description" rows="4" maxlength="1000" required { (form.description) }
                    (field_errors(errors, "description"))
                }
                button type="submit" { "Create and add questions" }
            }
        },
    )
}

pub fn create_question(
    user: &Claims,
    quiz: &Quiz,
    next_question_num: i64,
    form: &QuestionForm,
    errors: &FormErrors,
) -> Markup {
    let selected = form.answer_index();
    layout(
        &format!("Question {} for \"{}\"", next_question_num, quiz.title),
        Some(user),
        html! {
            form method="post" action=(format!("/quiz/{}/question/create", quiz.id)) {
                p {
                    label for="question" { "Question" }
                    textarea id="question" name="question" rows="3" maxlength="1000" required { (form.question) }
                    (field_errors(errors, "question"))
                }
                fieldset {
                    legend { "Choices (mark the correct one)" }
                    @for i in 0..CHOICES_PER_QUESTION {
                        p {
                            input type="radio" name="is_answer" value=(i) checked[selected == Some(i)];
                            " "
                            input type="text" name="choice" value=(form.choice_text(i)) maxlength="500" required;
                        }
                    }
                    (field_errors(errors, "choice"))
                    (field_errors(errors, "is_answer"))
                }
                button type="submit" { "Save and add another" }
            }
            p { a href="/home" { "Done" } }
        },
    )
}

pub fn quiz_list(user: &Claims, quizzes: &[Quiz], keyword: &str) -> Markup {
    layout(
        "Answer a quiz",
        Some(user),
        html! {
            form method="get" action="/quizzes" {
                input type="search" name="keyword" value=(keyword) placeholder="Search title or description";
                " "
                button type="submit" { "Search" }
            }
            @if quizzes.is_empty() {
                p { "No quizzes found." }
            } @else {
                ul {
                    @for quiz in quizzes {
                        li {
                            a href=(format!("/quiz/{}/answer", quiz.id)) { (quiz.title) }
                            p { (quiz.description) }
                        }
                    }
                }
            }
        },
    )
}

pub fn information(
    user: &Claims,
    quiz: &Quiz,
    information: &QuizInformation,
    answers: &[QuizAnswerEntry],
) -> Markup {
    layout(
        &format!("Statistics for \"{}\"", quiz.title),
        Some(user),
        html! {
            dl {
                dt { "Average score" }
                dd { (format!("{:.2}", information.average_score)) }
                dt { "Average answer rate" }
                dd { (format!("{:.1}%", information.answer_rate)) }
                dt { "Attempts" }
                dd { (answers.len()) }
            }
            table {
                thead {
                    tr { th { "User" } th { "Score" } th { "Answer rate" } th { "Answered at" } }
                }
                tbody {
                    @for answer in answers {
                        tr {
                            td { (answer.username) }
                            td { (answer.score) }
                            td { (format!("{:.1}%", answer.answer_rate)) }
                            td { (answer.answered_at.format("%Y-%m-%d %H:%M").to_string()) }
                        }
                    }
                }
            }
        },
    )
}
