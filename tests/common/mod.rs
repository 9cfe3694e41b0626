// tests/common/mod.rs

#![allow(dead_code)]

use std::str::FromStr;

use quizapp::{config::Config, routes, state::AppState};
use reqwest::{Response, header};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // 1. Create a single-connection pool; the in-memory database lives as long as that connection
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid SQLite URL")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory SQLite database");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cookie_secure: false,
        static_dir: "static".to_string(),
    };

    let state = AppState::new(pool.clone(), config);
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Redirects are asserted on, never followed
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { address, pool, client }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, session: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = session {
            request = request.header(header::COOKIE, cookie);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, session: Option<&str>, form: &[(&str, &str)]) -> Response {
        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(cookie) = session {
            request = request.header(header::COOKIE, cookie);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// Registers a fresh user and returns the `Cookie` header value of its session.
    pub async fn signup(&self, username: &str) -> String {
        let response = self
            .post_form(
                "/signup",
                None,
                &[
                    ("username", username),
                    ("password1", "password123"),
                    ("password2", "password123"),
                ],
            )
            .await;
        assert_eq!(response.status().as_u16(), 303, "signup should redirect");
        session_cookie(&response).expect("signup should start a session")
    }

    /// Creates a quiz as `session` and returns its id.
    pub async fn create_quiz(&self, session: &str, title: &str, description: &str) -> i64 {
        let response = self
            .post_form(
                "/quiz/create",
                Some(session),
                &[("title", title), ("description", description)],
            )
            .await;
        assert_eq!(response.status().as_u16(), 303);
        let location = location(&response);
        location
            .trim_start_matches("/quiz/")
            .trim_end_matches("/question/create")
            .parse()
            .expect("quiz id in redirect")
    }

    /// Adds a question with choices "A".."D", `correct` being the 0-based answer.
    pub async fn add_question(&self, session: &str, quiz_id: i64, text: &str, correct: usize) -> Response {
        let correct = correct.to_string();
        self.post_form(
            &format!("/quiz/{}/question/create", quiz_id),
            Some(session),
            &[
                ("question", text),
                ("choice", "A"),
                ("choice", "B"),
                ("choice", "C"),
                ("choice", "D"),
                ("is_answer", correct.as_str()),
            ],
        )
        .await
    }

    /// Choice ids of a question in insertion order.
    pub async fn choice_ids(&self, question_id: i64) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM choices WHERE question_id = ? ORDER BY id")
            .bind(question_id)
            .fetch_all(&self.pool)
            .await
            .unwrap()
    }

    pub async fn question_ids(&self, quiz_id: i64) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE quiz_id = ? ORDER BY id")
            .bind(quiz_id)
            .fetch_all(&self.pool)
            .await
            .unwrap()
    }
}

pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `sessionid=<token>` from the response's `Set-Cookie`, if a session was started.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("sessionid=") && pair.len() > "sessionid=".len())
        .map(str::to_string)
}
