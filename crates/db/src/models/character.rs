//! Character entity model.

use roster_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A character row from the `characters` table.
///
/// Optional text fields are stored as empty strings, never NULL.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub color: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub level: i32,
    pub photo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    /// The photo URL, if the character has one.
    pub fn photo_url(&self) -> Option<&str> {
        (!self.photo.is_empty()).then_some(self.photo.as_str())
    }
}
