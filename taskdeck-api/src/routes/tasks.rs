/// Task endpoints
///
/// Tasks hang off lists the way lists hang off boards, and the access rules
/// are symmetric: creation validates the parent list, mutation checks the
/// task and re-validates its parent.
///
/// # Endpoints
///
/// - `POST   /tasks`          - Create a task under an owned list
/// - `GET    /tasks?list_id=` - Tasks of an owned list, ordered by position
/// - `GET    /tasks/:id`      - Get a task (owner only)
/// - `PATCH  /tasks/:id`      - Update a task (owner only)
/// - `DELETE /tasks/:id`      - Delete a task (owner only)

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
    models::task::{CreateTask, Task, UpdateTask},
};
use validator::Validate;

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    /// Parent list
    pub list_id: i64,

    /// Ordering key within the list
    #[serde(default)]
    pub position: i32,
}

/// Task update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
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

/// Query parameters for listing tasks
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// List whose tasks to return
    pub list_id: i64,
}

/// Create a task under a list the caller owns
///
/// The parent list is validated before anything is written; on success the
/// task inherits the list owner's id.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    ownership::ensure_list_owner(&state.db, req.list_id, current.id).await?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            list_id: req.list_id,
            position: req.position,
        },
        current.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the tasks of an owned list, ordered by position
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    ownership::ensure_list_owner(&state.db, query.list_id, current.id).await?;

    let tasks = Task::list_by_list(&state.db, query.list_id).await?;
    Ok(Json(tasks))
}

/// Get a task by ID (owner only)
pub async fn get_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    ownership::check(&state.db, ResourceKind::Task, id, current.id).await?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Update a task (owner only)
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    ownership::check(&state.db, ResourceKind::Task, id, current.id).await?;

    // Re-validate the parent list; the denormalized owner copy must agree
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;
    ownership::ensure_list_owner(&state.db, task.list_id, current.id).await?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            position: req.position,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task (owner only)
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    ownership::check(&state.db, ResourceKind::Task, id, current.id).await?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;
    ownership::ensure_list_owner(&state.db, task.list_id, current.id).await?;

    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
