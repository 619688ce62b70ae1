//! Repository for the `characters` table.

use roster_core::character::ValidCharacter;
use roster_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::Character;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, \"type\", level, photo, created_at, updated_at";

/// Create, read, update, delete, and list for characters.
///
/// Inputs are [`ValidCharacter`] values, so nothing unvalidated can be
/// written.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the id assigned by the database.
    pub async fn create(pool: &PgPool, input: &ValidCharacter) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO characters (name, color, \"type\", level, photo)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.color)
        .bind(&input.kind)
        .bind(input.level)
        .bind(&input.photo)
        .fetch_one(pool)
        .await
    }

    /// Find a character by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every character in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id ASC");
        sqlx::query_as::<_, Character>(&query).fetch_all(pool).await
    }

    /// Count all characters.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters")
            .fetch_one(pool)
            .await
    }

    /// Replace every editable field of a character.
    ///
    /// `id` is only the match key. Returns `None` if no row with that id
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ValidCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = $2,
                color = $3,
                \"type\" = $4,
                level = $5,
                photo = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.kind)
            .bind(input.level)
            .bind(&input.photo)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a character, returning the name it had.
    ///
    /// The name is read by the same statement that removes the row. Returns
    /// `None` if no row with that id exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("DELETE FROM characters WHERE id = $1 RETURNING name")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
