/// List endpoints
///
/// Lists sit between boards and tasks. Creating one requires ownership of
/// the parent board, which is also where the list's denormalized `owner_id`
/// is copied from. Mutations check the list itself AND re-validate the
/// parent board; the double check is cheap and catches a stale owner copy.
///
/// # Endpoints
///
/// - `POST   /lists`           - Create a list under an owned board
/// - `GET    /lists?board_id=` - Lists of an owned board, ordered by position
/// - `GET    /lists/:id`       - Get a list (owner only)
/// - `PATCH  /lists/:id`       - Update a list (owner only)
/// - `DELETE /lists/:id`       - Delete a list and its tasks (owner only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskdeck_shared::{
    auth::{
        ownership::{self, ResourceKind},
        CurrentUser,
    },
    models::list::{CreateList, List, UpdateList},
};
use validator::Validate;

/// List creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    /// List title
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    /// Parent board
    pub board_id: i64,

    /// Ordering key within the board
    #[serde(default)]
    pub position: i32,
}

/// List update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListRequest {
    /// New title
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: Option<String>,

    /// New position
    pub position: Option<i32>,
}

/// Query parameters for listing lists
#[derive(Debug, Deserialize)]
pub struct ListListsQuery {
    /// Board whose lists to return
    pub board_id: i64,
}

/// Create a list under a board the caller owns
///
/// The parent board is validated before anything is written: a missing
/// board is a 404, a board owned by someone else is a 403, and in both
/// cases no row is inserted. On success the list inherits the board
/// owner's id.
pub async fn create_list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateListRequest>,
) -> ApiResult<(StatusCode, Json<List>)> {
    req.validate()?;

    ownership::ensure_board_owner(&state.db, req.board_id, current.id).await?;

    let list = List::create(
        &state.db,
        CreateList {
            title: req.title,
            board_id: req.board_id,
            position: req.position,
        },
        current.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// List the lists of an owned board, ordered by position
pub async fn list_lists(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListListsQuery>,
) -> ApiResult<Json<Vec<List>>> {
    ownership::ensure_board_owner(&state.db, query.board_id, current.id).await?;

    let lists = List::list_by_board(&state.db, query.board_id).await?;
    Ok(Json(lists))
}

/// Get a list by ID (owner only)
pub async fn get_list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<List>> {
    ownership::check(&state.db, ResourceKind::List, id, current.id).await?;

    let list = List::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    Ok(Json(list))
}

/// Update a list (owner only)
pub async fn update_list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateListRequest>,
) -> ApiResult<Json<List>> {
    req.validate()?;

    ownership::check(&state.db, ResourceKind::List, id, current.id).await?;

    // Re-validate the parent board; the denormalized owner copy must agree
    let list = List::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;
    ownership::ensure_board_owner(&state.db, list.board_id, current.id).await?;

    let list = List::update(
        &state.db,
        id,
        UpdateList {
            title: req.title,
            position: req.position,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    Ok(Json(list))
}

/// Delete a list (owner only)
///
/// The database cascade removes the list's tasks.
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    ownership::check(&state.db, ResourceKind::List, id, current.id).await?;

    let list = List::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;
    ownership::ensure_board_owner(&state.db, list.board_id, current.id).await?;

    let deleted = List::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("List not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
