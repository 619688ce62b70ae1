//! Session gate extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use roster_core::error::CoreError;
use roster_core::types::DbId;

use crate::auth::session::{validate_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires a session.
/// A missing, tampered, or expired token rejects with
/// [`CoreError::Unauthorized`], which responds with a redirect to `/login`
/// before the handler body runs:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Html<String>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Html(String::new()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's login name.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar.get(SESSION_COOKIE).map(|c| c.value()).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session cookie".into()))
        })?;

        let claims = validate_session_token(token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}
