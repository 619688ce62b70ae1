#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, Request, Response};
use axum::Router;
use axum_extra::extract::CookieJar;
use http_body_util::BodyExt;
use roster_api::auth::password::hash_password;
use roster_api::auth::session::{issue_session_token, SessionConfig, SESSION_COOKIE};
use roster_api::config::ServerConfig;
use roster_api::flash::{Flash, FLASH_COOKIE};
use roster_api::router::build_app_router;
use roster_api::state::AppState;
use roster_core::types::DbId;
use roster_db::models::user::{CreateUser, User};
use roster_db::repositories::UserRepo;
use roster_db::PoolSettings;
use roster_export::{DocumentRenderer, PhotoFetcher};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "blue-sky-99.1";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        database: PoolSettings::default(),
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 120,
            cookie_secure: false,
        },
        photo_fetch_timeout_secs: 2,
        photo_max_bytes: 1024 * 1024,
        seed_user: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same builder as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let fetcher = PhotoFetcher::new(config.photo_fetch_timeout(), config.photo_max_bytes)
        .expect("photo client should build");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        renderer: DocumentRenderer::new(fetcher),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// `Cookie` header value carrying a valid session for the given identity.
pub fn session_cookie(user_id: DbId, username: &str) -> String {
    let token = issue_session_token(user_id, username, &test_config().session)
        .expect("token should issue");
    format!("{SESSION_COOKIE}={token}")
}

/// Session for a user that never needs to exist in the database.
pub fn walt() -> String {
    session_cookie(1, "walt")
}

pub async fn create_test_user(pool: &PgPool, username: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(cookie), None).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(
    app: Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, cookie, Some(body.to_string())).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    form: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

/// Raw `Set-Cookie` header for cookie `name`, if the response sets one.
pub fn set_cookie<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
}

/// `name=value` pair from a `Set-Cookie` header, ready for a `Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

/// The flash message a response stores for the next page, read back the way
/// the server reads request cookies.
pub fn flash_of(response: &Response<Body>) -> Option<Flash> {
    let pair = cookie_pair(set_cookie(response, FLASH_COOKIE)?);
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&pair).ok()?);
    let jar = CookieJar::from_headers(&headers);
    let cookie = jar.get(FLASH_COOKIE)?;
    Flash::decode(cookie.value())
}
