// tests/quiz_tests.rs

mod common;

use common::{location, spawn_app, unique_name};

#[tokio::test]
async fn created_quiz_is_owned_by_its_author() {
    // Arrange
    let app = spawn_app().await;
    let username = unique_name("author");
    let session = app.signup(&username).await;

    // Act
    let quiz_id = app.create_quiz(&session, "Rust basics", "Ownership and borrowing").await;

    // Assert
    let owner: String = sqlx::query_scalar(
        "SELECT u.username FROM quizzes q JOIN users u ON q.user_id = u.id WHERE q.id = ?",
    )
    .bind(quiz_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(owner, username);

    let home = app.get("/home", Some(&session)).await.text().await.unwrap();
    assert!(home.contains("Rust basics"));
}

#[tokio::test]
async fn blank_quiz_fields_rerender_the_form() {
    let app = spawn_app().await;
    let session = app.signup(&unique_name("blank")).await;

    let response = app
        .post_form(
            "/quiz/create",
            Some(&session),
            &[("title", "   "), ("description", "Has a description")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("This field is required."));
    assert!(body.contains("Has a description"));

    let quizzes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(quizzes, 0);
}

#[tokio::test]
async fn question_creation_loops_back_and_flags_one_answer() {
    // Arrange
    let app = spawn_app().await;
    let session = app.signup(&unique_name("qa")).await;
    let quiz_id = app.create_quiz(&session, "Capitals", "World capitals").await;
    let form_path = format!("/quiz/{}/question/create", quiz_id);

    let form = app.get(&form_path, Some(&session)).await.text().await.unwrap();
    assert!(form.contains("Question 1"));

    // Act
    let first = app.add_question(&session, quiz_id, "Capital of France?", 2).await;
    let second = app.add_question(&session, quiz_id, "Capital of Japan?", 0).await;

    // Assert: both redirect to the same page
    assert_eq!(first.status().as_u16(), 303);
    assert_eq!(location(&first), form_path);
    assert_eq!(location(&second), form_path);

    let question_ids = app.question_ids(quiz_id).await;
    assert_eq!(question_ids.len(), 2);

    for (question_id, expected) in question_ids.iter().zip([2usize, 0]) {
        let flags: Vec<bool> =
            sqlx::query_scalar("SELECT is_answer FROM choices WHERE question_id = ? ORDER BY id")
                .bind(question_id)
                .fetch_all(&app.pool)
                .await
                .unwrap();
        assert_eq!(flags.len(), 4);
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        assert!(flags[expected]);
    }

    let form = app.get(&form_path, Some(&session)).await.text().await.unwrap();
    assert!(form.contains("Question 3"));
}

#[tokio::test]
async fn invalid_question_is_not_saved() {
    let app = spawn_app().await;
    let session = app.signup(&unique_name("badq")).await;
    let quiz_id = app.create_quiz(&session, "Quiz", "Description").await;

    let response = app
        .post_form(
            &format!("/quiz/{}/question/create", quiz_id),
            Some(&session),
            &[
                ("question", "Only three choices?"),
                ("choice", "A"),
                ("choice", "B"),
                ("choice", "C"),
                ("is_answer", "0"),
            ],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Enter exactly four choices."));
    assert!(app.question_ids(quiz_id).await.is_empty());
}

#[tokio::test]
async fn question_creation_for_missing_quiz_is_404() {
    let app = spawn_app().await;
    let session = app.signup(&unique_name("noquiz")).await;

    let response = app.get("/quiz/9999/question/create", Some(&session)).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.add_question(&session, 9999, "Anyone there?", 0).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn listing_excludes_own_quizzes_and_filters_by_keyword() {
    // Arrange
    let app = spawn_app().await;
    let author = app.signup(&unique_name("writer")).await;
    let reader = app.signup(&unique_name("reader")).await;

    app.create_quiz(&author, "Math Basics", "Numbers").await;
    app.create_quiz(&author, "Science", "Atoms").await;
    app.create_quiz(&author, "History", "math history").await;
    app.create_quiz(&reader, "Reader's own math quiz", "Mine").await;

    // Act
    let all = app.get("/quizzes", Some(&reader)).await.text().await.unwrap();
    let math = app.get("/quizzes?keyword=MATH", Some(&reader)).await.text().await.unwrap();
    let both = app
        .get("/quizzes?keyword=math+numbers", Some(&reader))
        .await
        .text()
        .await
        .unwrap();

    // Assert
    assert!(all.contains("Math Basics") && all.contains("Science") && all.contains("History"));
    assert!(!all.contains("own math quiz"));

    assert!(math.contains("Math Basics"));
    assert!(math.contains("History"));
    assert!(!math.contains("Science"));
    assert!(!math.contains("own math quiz"));

    assert!(both.contains("Math Basics"));
    assert!(!both.contains("History"));
}

#[tokio::test]
async fn answering_scores_and_aggregates() {
    // Arrange: Q1 correct is A, Q2 correct is C
    let app = spawn_app().await;
    let author = app.signup(&unique_name("teacher")).await;
    let quiz_id = app.create_quiz(&author, "Letters", "Pick the right letter").await;
    app.add_question(&author, quiz_id, "First?", 0).await;
    app.add_question(&author, quiz_id, "Second?", 2).await;

    let questions = app.question_ids(quiz_id).await;
    let q1 = app.choice_ids(questions[0]).await;
    let q2 = app.choice_ids(questions[1]).await;
    let (q1_key, q2_key) = (questions[0].to_string(), questions[1].to_string());

    let info_path = format!("/quiz/{}/info", quiz_id);
    let answer_path = format!("/quiz/{}/answer", quiz_id);
    let result_path = format!("/quiz/{}/result", quiz_id);

    // Nobody has answered yet
    assert_eq!(app.get(&info_path, Some(&author)).await.status().as_u16(), 404);

    let page = app.get(&answer_path, Some(&author)).await.text().await.unwrap();
    assert!(page.contains("First?") && page.contains("Second?"));

    // Act: the first respondent picks A and B
    let alice = app.signup(&unique_name("alice")).await;
    let (a, b) = (q1[0].to_string(), q2[1].to_string());
    let response = app
        .post_form(&answer_path, Some(&alice), &[(q1_key.as_str(), a.as_str()), (q2_key.as_str(), b.as_str())])
        .await;

    // Assert
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), result_path);

    let (score, rate): (i64, f64) =
        sqlx::query_as("SELECT score, answer_rate FROM quiz_answers WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(score, 1);
    assert_eq!(rate, 50.0);

    let result = app.get(&result_path, Some(&alice)).await.text().await.unwrap();
    assert!(result.contains("50.0%"));

    // Act: a second respondent gets both right
    let bob = app.signup(&unique_name("bob")).await;
    let (a, c) = (q1[0].to_string(), q2[2].to_string());
    app.post_form(&answer_path, Some(&bob), &[(q1_key.as_str(), a.as_str()), (q2_key.as_str(), c.as_str())])
        .await;

    // Assert: one aggregate row holding the means of both attempts
    let (rows, average_score, average_rate): (i64, f64, f64) = sqlx::query_as(
        "SELECT COUNT(*), MAX(average_score), MAX(answer_rate) FROM quiz_information WHERE quiz_id = ?",
    )
    .bind(quiz_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(average_score, 1.5);
    assert_eq!(average_rate, 75.0);

    let info = app.get(&info_path, Some(&alice)).await;
    assert_eq!(info.status().as_u16(), 200);
    let body = info.text().await.unwrap();
    assert!(body.contains("1.50"));
    assert!(body.contains("75.0%"));
}

#[tokio::test]
async fn result_shows_latest_attempt_or_nothing() {
    let app = spawn_app().await;
    let author = app.signup(&unique_name("setter")).await;
    let quiz_id = app.create_quiz(&author, "One question", "Easy").await;
    app.add_question(&author, quiz_id, "Pick D", 3).await;
    let question = app.question_ids(quiz_id).await[0];
    let choices = app.choice_ids(question).await;
    let key = question.to_string();

    let player = app.signup(&unique_name("player")).await;
    let result_path = format!("/quiz/{}/result", quiz_id);

    // No attempt yet
    let empty = app.get(&result_path, Some(&player)).await;
    assert_eq!(empty.status().as_u16(), 200);
    assert!(empty.text().await.unwrap().contains("not answered this quiz yet"));

    // Wrong, then right
    let answer_path = format!("/quiz/{}/answer", quiz_id);
    let wrong = choices[0].to_string();
    let right = choices[3].to_string();
    app.post_form(&answer_path, Some(&player), &[(key.as_str(), wrong.as_str())]).await;
    app.post_form(&answer_path, Some(&player), &[(key.as_str(), right.as_str())]).await;

    let attempts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_answers WHERE quiz_id = ?")
        .bind(quiz_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(attempts, 2);

    let latest = app.get(&result_path, Some(&player)).await.text().await.unwrap();
    assert!(latest.contains("100.0%"));
}

#[tokio::test]
async fn unknown_choice_is_404_and_records_nothing() {
    let app = spawn_app().await;
    let author = app.signup(&unique_name("maker")).await;
    let quiz_id = app.create_quiz(&author, "Quiz", "Description").await;
    app.add_question(&author, quiz_id, "Question", 1).await;
    let key = app.question_ids(quiz_id).await[0].to_string();

    let player = app.signup(&unique_name("guesser")).await;
    let answer_path = format!("/quiz/{}/answer", quiz_id);

    let unknown = app
        .post_form(&answer_path, Some(&player), &[(key.as_str(), "987654")])
        .await;
    assert_eq!(unknown.status().as_u16(), 404);

    let missing = app.post_form(&answer_path, Some(&player), &[]).await;
    assert_eq!(missing.status().as_u16(), 404);

    let attempts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_answers")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(attempts, 0);
}

#[tokio::test]
async fn quiz_without_questions_cannot_be_answered() {
    let app = spawn_app().await;
    let author = app.signup(&unique_name("empty")).await;
    let quiz_id = app.create_quiz(&author, "Empty quiz", "Nothing here").await;
    let player = app.signup(&unique_name("visitor")).await;
    let answer_path = format!("/quiz/{}/answer", quiz_id);

    let page = app.get(&answer_path, Some(&player)).await;
    assert_eq!(page.status().as_u16(), 200);
    assert!(page.text().await.unwrap().contains("no questions yet"));

    let response = app.post_form(&answer_path, Some(&player), &[]).await;
    assert_eq!(response.status().as_u16(), 400);

    let information: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_information")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(information, 0);
}

#[tokio::test]
async fn missing_quiz_pages_are_404() {
    let app = spawn_app().await;
    let username = unique_name("lost");
    let session = app.signup(&username).await;

    for path in ["/quiz/424242/answer", "/quiz/424242/result", "/quiz/424242/info", "/no/such/page"] {
        let response = app.get(path, Some(&session)).await;
        assert_eq!(response.status().as_u16(), 404, "{}", path);

        // The error page keeps the signed-in navigation
        let body = response.text().await.unwrap();
        assert!(body.contains("Quiz not found") || body.contains("Page not found"), "{}", path);
        assert!(body.contains(&username), "{}", path);
        assert!(body.contains("Log out"), "{}", path);
    }
}

#[tokio::test]
async fn error_pages_for_anonymous_visitors_offer_login() {
    let app = spawn_app().await;

    let response = app.get("/no/such/page", None).await;

    assert_eq!(response.status().as_u16(), 404);
    let body = response.text().await.unwrap();
    assert!(body.contains("Log in"));
    assert!(!body.contains("Log out"));
}

#[tokio::test]
async fn bad_request_page_keeps_the_session() {
    let app = spawn_app().await;
    let author = app.signup(&unique_name("hollow")).await;
    let quiz_id = app.create_quiz(&author, "Hollow quiz", "No questions").await;
    let username = unique_name("keen");
    let player = app.signup(&username).await;

    let response = app
        .post_form(&format!("/quiz/{}/answer", quiz_id), Some(&player), &[])
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("no questions yet"));
    assert!(body.contains(&username));
}
