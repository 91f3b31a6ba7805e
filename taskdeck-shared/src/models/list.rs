/// List model and database operations
///
/// Lists are the columns of a board. A list's `owner_id` is copied from the
/// owning board's owner at creation time and never updated afterward, so
/// ownership checks on a list never need to join up to the board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// List model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    /// Unique list ID
    pub id: i64,

    /// List title
    pub title: String,

    /// Ordering key within the board (not required to be unique)
    pub position: i32,

    /// ID of the board this list belongs to
    pub board_id: i64,

    /// ID of the owning user, copied from the board at creation
    pub owner_id: i64,

    /// When the list was created
    pub created_at: DateTime<Utc>,

    /// When the list was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateList {
    /// List title
    pub title: String,

    /// Board the list belongs to
    pub board_id: i64,

    /// Ordering key within the board
    pub position: i32,
}

/// Input for updating a list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateList {
    /// New title
    pub title: Option<String>,

    /// New position
    pub position: Option<i32>,
}

impl List {
    /// Creates a new list under a board
    ///
    /// The caller must have validated that `owner_id` is the board's owner;
    /// this function just records the denormalized copy.
    pub async fn create(
        pool: &PgPool,
        data: CreateList,
        owner_id: i64,
    ) -> Result<Self, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (title, position, board_id, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, position, board_id, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.position)
        .bind(data.board_id)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(list)
    }

    /// Finds a list by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            SELECT id, title, position, board_id, owner_id, created_at, updated_at
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(list)
    }

    /// Lists all lists under a board, ordered by position
    pub async fn list_by_board(pool: &PgPool, board_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT id, title, position, board_id, owner_id, created_at, updated_at
            FROM lists
            WHERE board_id = $1
            ORDER BY position
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(lists)
    }

    /// Updates a list
    ///
    /// Returns the updated list, or None if no list with that ID exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateList,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE lists SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.position.is_some() {
            bind_count += 1;
            query.push_str(&format!(", position = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, position, board_id, owner_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, List>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(position) = data.position {
            q = q.bind(position);
        }

        let list = q.fetch_optional(pool).await?;

        Ok(list)
    }

    /// Deletes a list by ID
    ///
    /// Tasks under the list are removed by cascade. Returns true if a row
    /// was deleted, false if the list didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_list_default() {
        let update = UpdateList::default();
        assert!(update.title.is_none());
        assert!(update.position.is_none());
    }
}
