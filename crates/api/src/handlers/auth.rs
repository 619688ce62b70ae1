//! Handlers for the login and logout pages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use roster_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::session::{issue_session_token, SESSION_COOKIE};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_form() -> Html<String> {
    Html(views::login_page("", None))
}

/// POST /login
///
/// Verify the credentials and, on success, set the session cookie and
/// redirect to the list. A failed attempt re-renders the form with a 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<LoginForm>,
) -> AppResult<Response> {
    let username = input.username.trim();

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        tracing::info!(%username, "Login rejected: unknown user");
        return Ok(rejected(username));
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Ok(rejected(username));
    }

    let token = issue_session_token(user.id, &user.username, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.config.session.cookie_secure)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(user_id = user.id, "User logged in");
    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

/// GET /logout
///
/// Clear the session cookie. Works with or without a valid session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/login"),
    )
}

fn rejected(username: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(views::login_page(username, Some(INVALID_CREDENTIALS))),
    )
        .into_response()
}
