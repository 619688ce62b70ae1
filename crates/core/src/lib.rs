//! Domain types and pure logic for the character roster.
//!
//! Nothing in this crate performs I/O: the validator, escaping, and naming
//! helpers are plain functions of their input so every layer above can share
//! them.

pub mod character;
pub mod error;
pub mod escape;
pub mod naming;
pub mod types;
