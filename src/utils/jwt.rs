// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "sessionid";

/// Where anonymous visitors of protected pages are sent.
pub const LOGIN_PATH: &str = "/login";

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub username: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl Claims {
    /// Numeric user id stored in `sub`.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|e| AppError::InternalServerError(format!("Malformed session subject: {}", e)))
    }
}

/// Signs a new JWT for the user.
///
/// Arguments:
/// * `id`: User ID.
/// * `username`: Shown in the page header without a database round trip.
pub fn sign_jwt(
    id: i64,
    username: &str,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    // Calculate expiration: current time + expiration_seconds
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: id.to_string(),
        username: username.to_owned(),
        exp: expiration,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies and decodes a JWT string.
///
/// Returns `None` for any invalid or expired token.
pub fn verify_jwt(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Builds the session cookie for a freshly authenticated user.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

/// Starts a session: signs a token for the user and stores it in the cookie jar.
pub fn start_session(
    jar: CookieJar,
    user_id: i64,
    username: &str,
    config: &Config,
) -> Result<CookieJar, AppError> {
    let token = sign_jwt(user_id, username, &config.jwt_secret, config.jwt_expiration)?;
    Ok(jar.add(session_cookie(token, config)))
}

pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

pub fn claims_from_jar(jar: &CookieJar, config: &Config) -> Option<Claims> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| verify_jwt(cookie.value(), &config.jwt_secret))
}

/// Request-scoped view of the session: the signed-in user, if any.
///
/// Never rejects; public pages use it to adapt their navigation.
pub struct CurrentUser(pub Option<Claims>);

impl<S> FromRequestParts<S> for CurrentUser
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(CurrentUser(claims_from_jar(&jar, &config)))
    }
}

/// Axum Middleware: Authentication.
///
/// Reads the session cookie. If it holds a valid token, injects `Claims` into
/// the request extensions for handlers to use. Otherwise redirects to the login
/// page, remembering the requested path in `next`.
pub async fn require_login(
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match claims_from_jar(&jar, &config) {
        Some(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        None => {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            Redirect::to(&login_url(target)).into_response()
        }
    }
}

/// `/login?next=<target>` with the target percent-encoded.
pub fn login_url(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{}?next={}", LOGIN_PATH, encoded)
}

/// Accepts only same-site absolute paths as post-login destinations.
///
/// Browsers drop tabs and newlines while parsing a URL, so `/\t/host` would
/// turn into `//host`; any control character disqualifies the target.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| {
        n.starts_with('/')
            && !n.starts_with("//")
            && !n.contains('\\')
            && !n.chars().any(char::is_control)
    })
}
