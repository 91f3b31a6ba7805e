/// Ownership authorization engine
///
/// Every board, list, and task row stores the id of the user who ultimately
/// owns it. For lists and tasks that `owner_id` is a denormalized copy taken
/// from the parent chain at creation time, so authorization never has to
/// join up the hierarchy: one single-column select answers "may this user
/// act on this resource" in O(1) regardless of nesting depth.
///
/// The engine distinguishes the two failure modes instead of collapsing them
/// into a boolean: a missing row is [`OwnershipError::NotFound`] (surfaced
/// as 404) and a row owned by somebody else is [`OwnershipError::NotOwner`]
/// (surfaced as 403). Callers map both uniformly.
///
/// [`check`] gates read/update/delete on existing rows. Creation of a list
/// or task cannot use it (the child has no id yet), so the parent is
/// validated instead with [`ensure_board_owner`] / [`ensure_list_owner`];
/// the same helpers are re-run on update and delete as a cheap re-check of
/// the denormalized copy.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::ownership::{check, ResourceKind};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// // Fails with NotFound or NotOwner unless board 7 belongs to user 3
/// check(&pool, ResourceKind::Board, 7, 3).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use std::fmt;

/// The kind of resource an ownership check runs against
///
/// Maps one-to-one onto the three owned tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Board,
    List,
    Task,
}

impl ResourceKind {
    /// The table holding rows of this kind
    pub fn table(&self) -> &'static str {
        match self {
            ResourceKind::Board => "boards",
            ResourceKind::List => "lists",
            ResourceKind::Task => "tasks",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Board => write!(f, "Board"),
            ResourceKind::List => write!(f, "List"),
            ResourceKind::Task => write!(f, "Task"),
        }
    }
}

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// No row with the given id exists
    #[error("{0} not found")]
    NotFound(ResourceKind),

    /// The row exists but belongs to a different user
    #[error("Not the owner of this {0}")]
    NotOwner(ResourceKind),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Checks that `user_id` owns the resource of `kind` with id `resource_id`
///
/// Loads only the `owner_id` column of the target row. This is a direct
/// ownership check: the transitive User → Board → List → Task relation is
/// already folded into the stored `owner_id` by construction.
///
/// # Errors
///
/// - [`OwnershipError::NotFound`] if no such row exists
/// - [`OwnershipError::NotOwner`] if the row is owned by another user
/// - [`OwnershipError::Database`] if the query fails
pub async fn check(
    pool: &PgPool,
    kind: ResourceKind,
    resource_id: i64,
    user_id: i64,
) -> Result<(), OwnershipError> {
    // kind.table() comes from a closed enum, never from user input
    let query = format!("SELECT owner_id FROM {} WHERE id = $1", kind.table());

    let row: Option<(i64,)> = sqlx::query_as(&query)
        .bind(resource_id)
        .fetch_optional(pool)
        .await?;

    match row {
        None => Err(OwnershipError::NotFound(kind)),
        Some((owner_id,)) if owner_id == user_id => Ok(()),
        Some(_) => Err(OwnershipError::NotOwner(kind)),
    }
}

/// Validates that a board exists and is owned by `user_id`
///
/// Used before creating or listing the board's lists, and re-run on list
/// mutation as defense against the denormalized owner copy going stale.
pub async fn ensure_board_owner(
    pool: &PgPool,
    board_id: i64,
    user_id: i64,
) -> Result<(), OwnershipError> {
    check(pool, ResourceKind::Board, board_id, user_id).await
}

/// Validates that a list exists and is owned by `user_id`
///
/// The list-side counterpart of [`ensure_board_owner`], used for task
/// creation, listing, and mutation.
pub async fn ensure_list_owner(
    pool: &PgPool,
    list_id: i64,
    user_id: i64,
) -> Result<(), OwnershipError> {
    check(pool, ResourceKind::List, list_id, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_tables() {
        assert_eq!(ResourceKind::Board.table(), "boards");
        assert_eq!(ResourceKind::List.table(), "lists");
        assert_eq!(ResourceKind::Task.table(), "tasks");
    }

    #[test]
    fn test_resource_kind_display() {
        assert_eq!(ResourceKind::Board.to_string(), "Board");
        assert_eq!(ResourceKind::List.to_string(), "List");
        assert_eq!(ResourceKind::Task.to_string(), "Task");
    }

    #[test]
    fn test_ownership_error_messages() {
        let err = OwnershipError::NotFound(ResourceKind::Board);
        assert_eq!(err.to_string(), "Board not found");

        let err = OwnershipError::NotOwner(ResourceKind::Task);
        assert_eq!(err.to_string(), "Not the owner of this Task");
    }

    // Database-backed tests for check/ensure_* are in
    // taskdeck-api/tests/ownership_test.rs.
}
