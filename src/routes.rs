// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    error::render_error_pages,
    handlers::{answer, auth, pages, question, quiz},
    state::AppState,
    utils::jwt::require_login,
};

/// Assembles the main application router.
///
/// * Public pages: landing, signup, login and static assets.
/// * Everything else sits behind `require_login`, which redirects anonymous
///   visitors to the login page.
/// * Applies global request tracing and session-aware error pages.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(pages::index))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/login", get(auth::login_form).post(auth::login));

    let protected_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/home", get(quiz::home))
        .route("/quiz/create", get(quiz::create_quiz_form).post(quiz::create_quiz))
        .route(
            "/quiz/{quiz_id}/question/create",
            get(question::create_question_form).post(question::create_question),
        )
        .route("/quizzes", get(quiz::list_quizzes))
        .route(
            "/quiz/{quiz_id}/answer",
            get(answer::answer_quiz_form).post(answer::answer_quiz),
        )
        .route("/quiz/{quiz_id}/result", get(answer::result))
        .route("/quiz/{quiz_id}/info", get(quiz::quiz_information))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .fallback(pages::not_found)
        // Global Middleware (the last layer is the outermost)
        .layer(middleware::from_fn_with_state(state.clone(), render_error_pages))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
