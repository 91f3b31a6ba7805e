/// User endpoints
///
/// Registration is public; everything else goes through the identity
/// middleware and is gated by the access-check predicates: listing is
/// admin-only, while reading, updating, and deleting a specific account is
/// allowed for that account itself or for an admin.
///
/// # Endpoints
///
/// - `POST   /users`     - Register a new account (public)
/// - `GET    /users`     - List all users (admin only)
/// - `GET    /users/:id` - Get a user (self or admin)
/// - `PATCH  /users/:id` - Update a user (self or admin)
/// - `DELETE /users/:id` - Delete a user (self or admin)
///
/// Responses never include the password hash; the `User` serializer strips
/// it unconditionally.

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
        guard::{self, AccessCheck, IsAdmin},
        password, CurrentUser,
    },
    models::user::{CreateUser, UpdateUser, User},
};
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
}

/// Update request; every field optional
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    /// New display name
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
}

/// Register a new user
///
/// Creates an account with the USER role. The password is hashed with
/// Argon2id before it touches the database; the plaintext is never stored.
///
/// # Errors
///
/// - `409 Conflict`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    // Checked up front for a clean 409; the unique index still backstops
    // concurrent registrations
    if User::email_taken(&state.db, &req.email, None).await? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<User>>> {
    if !IsAdmin.allows(&current) {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Get a user by ID (self or admin)
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    if !guard::self_or_admin(id).allows(&current) {
        return Err(ApiError::Forbidden(
            "Cannot access another user's account".to_string(),
        ));
    }

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update a user (self or admin)
///
/// A changed email is checked for uniqueness against every OTHER account;
/// keeping one's own address is not a conflict. A changed password is
/// re-hashed before storage.
///
/// # Errors
///
/// - `403 Forbidden`: Not self and not an admin
/// - `404 Not Found`: No such user
/// - `409 Conflict`: Email in use by another account
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    if !guard::self_or_admin(id).allows(&current) {
        return Err(ApiError::Forbidden(
            "Cannot modify another user's account".to_string(),
        ));
    }

    if let Some(email) = &req.email {
        if User::email_taken(&state.db, email, Some(id)).await? {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }
    }

    let password_hash = match &req.password {
        Some(password) => Some(password::hash_password(password)?),
        None => None,
    };

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            email: req.email,
            password_hash,
            name: req.name,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Delete a user (self or admin)
///
/// Boards, lists, and tasks owned by the account are removed by the
/// database cascade. Outstanding tokens for the account stop working at the
/// next request because the identity middleware re-resolves the subject.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !guard::self_or_admin(id).allows(&current) {
        return Err(ApiError::Forbidden(
            "Cannot delete another user's account".to_string(),
        ));
    }

    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
