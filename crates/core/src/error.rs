/// Domain-level failure kinds.
///
/// Storage failures stay as `sqlx::Error` until the HTTP layer, and
/// validation failures never leave the form handler, so neither appears here.
/// A missing record is not an error either: handlers answer it with a flash
/// redirect.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
