//! # TaskDeck Shared Library
//!
//! This crate contains the types and business logic shared by the TaskDeck
//! API server and its tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models for the ownership hierarchy (User → Board → List → Task)
//! - `auth`: Password hashing, JWT tokens, ownership authorization, access checks
//! - `db`: Connection pooling and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
