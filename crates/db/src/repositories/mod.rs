//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&PgPool` as the first argument. "Not found" is `Ok(None)`; every
//! `Err` is a storage failure for the caller to report.

pub mod character_repo;
pub mod user_repo;

pub use character_repo::CharacterRepo;
pub use user_repo::UserRepo;
