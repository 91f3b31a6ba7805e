/// Database models for TaskDeck
///
/// This module contains the four tables of the ownership hierarchy and their
/// CRUD operations.
///
/// # Models
///
/// - `user`: Accounts; own every other resource transitively
/// - `board`: Top-level boards, directly owned by a user
/// - `list`: Columns within a board; owner copied from the board at creation
/// - `task`: Cards within a list; owner copied from the list at creation
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{CreateUser, User};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "ann@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         name: "Ann".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod board;
pub mod list;
pub mod task;
pub mod user;
