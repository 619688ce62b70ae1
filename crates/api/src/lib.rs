//! Roster web server library.
//!
//! Exposes the building blocks (config, state, session gate, error handling,
//! views, routes) so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod seed;
pub mod state;
pub mod views;
