/// Board endpoints
///
/// Boards are the top of the ownership hierarchy: a board belongs directly
/// to the user who created it, and every per-board operation runs through
/// the ownership engine first.
///
/// # Endpoints
///
/// - `POST   /boards`      - Create a board owned by the caller
/// - `GET    /boards/mine` - List the caller's boards
/// - `GET    /boards/:id`  - Get a board (owner only)
/// - `PATCH  /boards/:id`  - Update a board (owner only)
/// - `DELETE /boards/:id`  - Delete a board and its lists/tasks (owner only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskdeck_shared::{
    auth::{
        ownership::{self, ResourceKind},
        CurrentUser,
    },
    models::board::{Board, CreateBoard, UpdateBoard},
};
use validator::Validate;

/// Board creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board title
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,
}

/// Board update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    /// New title
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: Option<String>,
}

/// Create a board owned by the caller
pub async fn create_board(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    req.validate()?;

    let board = Board::create(&state.db, CreateBoard { title: req.title }, current.id).await?;

    Ok((StatusCode::CREATED, Json(board)))
}

/// List the caller's boards
pub async fn list_my_boards(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Board>>> {
    let boards = Board::list_by_owner(&state.db, current.id).await?;
    Ok(Json(boards))
}

/// Get a board by ID (owner only)
pub async fn get_board(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Board>> {
    ownership::check(&state.db, ResourceKind::Board, id, current.id).await?;

    let board = Board::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    Ok(Json(board))
}

/// Update a board (owner only)
pub async fn update_board(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<Board>> {
    req.validate()?;

    ownership::check(&state.db, ResourceKind::Board, id, current.id).await?;

    let board = Board::update(&state.db, id, UpdateBoard { title: req.title })
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    Ok(Json(board))
}

/// Delete a board (owner only)
///
/// The database cascade removes the board's lists and their tasks in the
/// same statement.
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    ownership::check(&state.db, ResourceKind::Board, id, current.id).await?;

    let deleted = Board::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Board not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
