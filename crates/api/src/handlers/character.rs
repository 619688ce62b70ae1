//! Handlers for the character catalog pages.
//!
//! Every handler takes [`AuthUser`] as its first extractor, so an
//! unauthenticated request is redirected before any query string, form body,
//! or database access is touched.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use roster_core::character::{validate, CharacterInput, ValidationErrors};
use roster_core::types::DbId;
use roster_db::repositories::CharacterRepo;
use roster_export::ExportFormat;
use serde::Deserialize;

use crate::error::AppResult;
use crate::flash::{redirect_with_flash, take_flash, Flash};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::views::{self, FormMode};

const INVALID_ID: &str = "Invalid id";
const NOT_FOUND: &str = "Character not found";
const SAVE_FAILED: &str = "Could not save the character, please try again";
const UNSUPPORTED_FORMAT: &str = "Unsupported export format";

/// Longest name quoted in a flash message; the whole message must fit in a cookie.
const FLASH_NAME_MAX_CHARS: usize = 64;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// `?id=N` on the edit, delete, and export routes.
///
/// Kept as a string so a malformed id reaches the handler and is reported
/// with a flash message instead of a bare 400.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    fn parse(&self) -> Option<DbId> {
        self.id.as_deref()?.trim().parse().ok()
    }
}

/// `?id=N&format=pdf|html` on the export route.
///
/// `format` is parsed by the handler for the same reason as `id`.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub id: Option<String>,
    pub format: Option<String>,
}

impl ExportQuery {
    /// Absent or empty means PDF; an unknown value is `None`.
    fn format(&self) -> Option<ExportFormat> {
        match self.format.as_deref().map(str::trim) {
            None | Some("") => Some(ExportFormat::default()),
            Some(raw) => ExportFormat::parse(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// List every character in id order. Shows, then clears, any pending flash.
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let characters = CharacterRepo::list(&state.pool).await?;
    let (jar, flash) = take_flash(jar);
    Ok((
        jar,
        Html(views::list_page(&user.username, &characters, flash.as_ref())),
    ))
}

/// GET /characters/new
pub async fn new_form(user: AuthUser) -> Html<String> {
    Html(views::character_form_page(
        &user.username,
        FormMode::Create,
        &CharacterInput::default(),
        &[],
    ))
}

/// POST /characters/new
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<CharacterInput>,
) -> Response {
    let valid = match validate(&input) {
        Ok(valid) => valid,
        Err(errors) => return invalid_form(&user, FormMode::Create, &input, &errors),
    };

    match CharacterRepo::create(&state.pool, &valid).await {
        Ok(id) => {
            tracing::info!(id, user_id = user.user_id, "Character created");
            redirect_with_flash(jar, Flash::success("Character created successfully"), "/")
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = user.user_id, "Failed to create character");
            save_failed(&user, FormMode::Create, &input)
        }
    }
}

/// GET /characters/edit?id=N
pub async fn edit_form(
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    let Some(id) = query.parse() else {
        return Ok(redirect_with_flash(jar, Flash::danger(INVALID_ID), "/").into_response());
    };

    let Some(character) = CharacterRepo::find_by_id(&state.pool, id).await? else {
        return Ok(redirect_with_flash(jar, Flash::danger(NOT_FOUND), "/").into_response());
    };

    Ok(Html(views::character_form_page(
        &user.username,
        FormMode::Edit(id),
        &views::input_from_character(&character),
        &[],
    ))
    .into_response())
}

/// POST /characters/edit?id=N
///
/// Replace every editable field of the record. The id in the query string is
/// the match key only. A missing record is reported before the input is
/// validated, so there is never a form for a record that does not exist.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<IdQuery>,
    Form(input): Form<CharacterInput>,
) -> Response {
    let Some(id) = query.parse() else {
        return redirect_with_flash(jar, Flash::danger(INVALID_ID), "/").into_response();
    };

    match CharacterRepo::find_by_id(&state.pool, id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return redirect_with_flash(jar, Flash::danger(NOT_FOUND), "/").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, id, user_id = user.user_id, "Failed to load character");
            return save_failed(&user, FormMode::Edit(id), &input);
        }
    }

    let valid = match validate(&input) {
        Ok(valid) => valid,
        Err(errors) => return invalid_form(&user, FormMode::Edit(id), &input, &errors),
    };

    match CharacterRepo::update(&state.pool, id, &valid).await {
        Ok(Some(_)) => {
            tracing::info!(id, user_id = user.user_id, "Character updated");
            redirect_with_flash(jar, Flash::success("Character updated successfully"), "/")
                .into_response()
        }
        Ok(None) => redirect_with_flash(jar, Flash::danger(NOT_FOUND), "/").into_response(),
        Err(e) => {
            tracing::error!(error = %e, id, user_id = user.user_id, "Failed to update character");
            save_failed(&user, FormMode::Edit(id), &input)
        }
    }
}

/// GET /characters/delete?id=N
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<IdQuery>,
) -> Response {
    let Some(id) = query.parse() else {
        return redirect_with_flash(jar, Flash::danger(INVALID_ID), "/").into_response();
    };

    let flash = match CharacterRepo::delete(&state.pool, id).await {
        Ok(Some(name)) => {
            tracing::info!(id, user_id = user.user_id, "Character deleted");
            Flash::success(format!(
                "Character '{}' deleted successfully",
                shorten(&name, FLASH_NAME_MAX_CHARS)
            ))
        }
        Ok(None) => Flash::danger(NOT_FOUND),
        Err(e) => {
            tracing::error!(error = %e, id, user_id = user.user_id, "Failed to delete character");
            Flash::danger("Could not delete the character")
        }
    };

    redirect_with_flash(jar, flash, "/").into_response()
}

/// GET /characters/export?id=N[&format=pdf|html]
///
/// Send the rendered profile as an attachment. Only a record that was found
/// is ever rendered.
pub async fn export(
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let Some(format) = query.format() else {
        return Ok(
            redirect_with_flash(jar, Flash::danger(UNSUPPORTED_FORMAT), "/").into_response(),
        );
    };
    let id_query = IdQuery { id: query.id };
    let Some(id) = id_query.parse() else {
        return Ok(redirect_with_flash(jar, Flash::danger(INVALID_ID), "/").into_response());
    };

    let Some(character) = CharacterRepo::find_by_id(&state.pool, id).await? else {
        return Ok(redirect_with_flash(jar, Flash::danger(NOT_FOUND), "/").into_response());
    };

    let rendered = state.renderer.render(&character, format).await?;
    tracing::info!(id, user_id = user.user_id, filename = %rendered.filename, "Character exported");

    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", rendered.filename),
            ),
        ],
        rendered.bytes,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Re-render the form with the submitted values and every validation message.
fn invalid_form(
    user: &AuthUser,
    mode: FormMode,
    input: &CharacterInput,
    errors: &ValidationErrors,
) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::character_form_page(
            &user.username,
            mode,
            input,
            &errors.messages(),
        )),
    )
        .into_response()
}

/// First `max` characters of `name`, with `...` appended when cut.
fn shorten(name: &str, max: usize) -> String {
    match name.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

fn save_failed(user: &AuthUser, mode: FormMode, input: &CharacterInput) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::character_form_page(
            &user.username,
            mode,
            input,
            &[SAVE_FAILED.to_string()],
        )),
    )
        .into_response()
}
