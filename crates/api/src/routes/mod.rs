pub mod auth;
pub mod character;
pub mod health;
