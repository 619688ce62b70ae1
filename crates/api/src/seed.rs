//! Startup account seeding.

use roster_db::models::user::CreateUser;
use roster_db::repositories::UserRepo;
use roster_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::SeedUser;
use crate::error::{AppError, AppResult};

/// Create the seed account unless a user with that name already exists.
///
/// Returns `true` when a new account was inserted. An existing account is
/// left untouched, its password included.
pub async fn ensure_seed_user(pool: &DbPool, seed: &SeedUser) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &seed.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %seed.username, "Seed user already present");
        return Ok(false);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::InternalError)?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: seed.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Seed user created");
    Ok(true)
}
