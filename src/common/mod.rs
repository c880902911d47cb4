//! Shared error types and helpers

pub mod errors;
