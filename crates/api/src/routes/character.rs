//! Route definitions for the character catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// All routes require a session.
///
/// ```text
/// GET  /                              -> list
/// GET  /characters/new                -> new_form
/// POST /characters/new                -> create
/// GET  /characters/edit?id=N          -> edit_form
/// POST /characters/edit?id=N          -> update
/// GET  /characters/delete?id=N        -> delete
/// GET  /characters/export?id=N        -> export (format=pdf|html)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list))
        .route(
            "/characters/new",
            get(character::new_form).post(character::create),
        )
        .route(
            "/characters/edit",
            get(character::edit_form).post(character::update),
        )
        .route("/characters/delete", get(character::delete))
        .route("/characters/export", get(character::export))
}
