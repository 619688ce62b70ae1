//! HTTP-level tests for login, logout, and the session gate in front of every
//! catalog route.

mod common;

use axum::http::StatusCode;
use common::{
    body_string, cookie_pair, create_test_user, get, get_with_cookie, post_form, set_cookie,
    TEST_PASSWORD,
};
use roster_api::auth::session::SESSION_COOKIE;
use roster_core::character::{validate, CharacterInput};
use roster_db::repositories::CharacterRepo;
use sqlx::PgPool;

const PROTECTED_GETS: [&str; 5] = [
    "/",
    "/characters/new",
    "/characters/edit?id=1",
    "/characters/delete?id=1",
    "/characters/export?id=1",
];

async fn insert_character(pool: &PgPool, name: &str) -> i64 {
    let valid = validate(&CharacterInput {
        name: name.to_string(),
        ..Default::default()
    })
    .unwrap();
    CharacterRepo::create(pool, &valid).await.unwrap()
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_protected_route_redirects_without_session(pool: PgPool) {
    for uri in PROTECTED_GETS {
        let response = get(common::build_test_app(pool.clone()), uri).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(common::location(&response), "/login", "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_posts_redirect_without_session(pool: PgPool) {
    for uri in ["/characters/new", "/characters/edit?id=1"] {
        let response = post_form(
            common::build_test_app(pool.clone()),
            uri,
            "name=Walt",
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(common::location(&response), "/login", "{uri}");
    }

    assert_eq!(CharacterRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn denied_delete_leaves_record_in_place(pool: PgPool) {
    let id = insert_character(&pool, "Hank").await;
    let app = common::build_test_app(pool.clone());

    let response = get(app, &format!("/characters/delete?id={id}")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(CharacterRepo::find_by_id(&pool, id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tampered_session_is_rejected(pool: PgPool) {
    let mut cookie = common::walt();
    cookie.push('x');

    let response = get_with_cookie(common::build_test_app(pool), "/", &cookie).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_session_reaches_the_list(pool: PgPool) {
    let response = get_with_cookie(common::build_test_app(pool), "/", &common::walt()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Welcome, walt"));
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_form_is_public(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/login").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("name=\"password\""));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_sets_session_and_opens_the_list(pool: PgPool) {
    create_test_user(&pool, "jesse").await;

    let response = post_form(
        common::build_test_app(pool.clone()),
        "/login",
        &format!("username=jesse&password={TEST_PASSWORD}"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/");
    let header = set_cookie(&response, SESSION_COOKIE).expect("session cookie should be set");
    assert!(header.contains("HttpOnly"));

    let list = get_with_cookie(
        common::build_test_app(pool),
        "/",
        &cookie_pair(header),
    )
    .await;
    assert_eq!(list.status(), StatusCode::OK);
    assert!(body_string(list).await.contains("Welcome, jesse"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_rejected(pool: PgPool) {
    create_test_user(&pool, "jesse").await;

    let response = post_form(
        common::build_test_app(pool),
        "/login",
        "username=jesse&password=not-the-password",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, SESSION_COOKIE).is_none());
    let body = body_string(response).await;
    assert!(body.contains("Invalid username or password"));
    assert!(body.contains("value=\"jesse\""), "username should be kept");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_unknown_user_is_rejected(pool: PgPool) {
    let response = post_form(
        common::build_test_app(pool),
        "/login",
        &format!("username=nobody&password={TEST_PASSWORD}"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, SESSION_COOKIE).is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_clears_the_session_cookie(pool: PgPool) {
    let response =
        get_with_cookie(common::build_test_app(pool), "/logout", &common::walt()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
    let header = set_cookie(&response, SESSION_COOKIE).expect("removal cookie should be set");
    assert!(header.starts_with(&format!("{SESSION_COOKIE}=;")));
}
