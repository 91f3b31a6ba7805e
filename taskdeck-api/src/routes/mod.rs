/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login endpoint
/// - `users`: Registration and user management
/// - `boards`: Board CRUD
/// - `lists`: List CRUD within boards
/// - `tasks`: Task CRUD within lists

pub mod health;
pub mod auth;
pub mod users;
pub mod boards;
pub mod lists;
pub mod tasks;
