/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::{
    auth::{jwt, CurrentUser},
    models::user::User,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET    /health            # Health check (public)
/// ├── POST   /auth/login        # Exchange credentials for a token (public)
/// ├── POST   /users             # Register (public)
/// ├── GET    /users             # List users (admin only)
/// ├── GET    /users/:id         # Get user (self or admin)
/// ├── PATCH  /users/:id         # Update user (self or admin)
/// ├── DELETE /users/:id         # Delete user (self or admin)
/// ├── POST   /boards            # Create board
/// ├── GET    /boards/mine       # List own boards
/// ├── GET    /boards/:id        # Get board (owner only)
/// ├── PATCH  /boards/:id        # Update board (owner only)
/// ├── DELETE /boards/:id        # Delete board (owner only)
/// ├── POST   /lists             # Create list (owner of parent board)
/// ├── GET    /lists?board_id=   # List lists of an owned board
/// ├── GET    /lists/:id         # Get list (owner only)
/// ├── PATCH  /lists/:id         # Update list (owner only)
/// ├── DELETE /lists/:id         # Delete list (owner only)
/// ├── POST   /tasks             # Create task (owner of parent list)
/// ├── GET    /tasks?list_id=    # List tasks of an owned list
/// ├── GET    /tasks/:id         # Get task (owner only)
/// ├── PATCH  /tasks/:id         # Update task (owner only)
/// └── DELETE /tasks/:id         # Delete task (owner only)
/// ```
///
/// Everything below `/auth/login`, `/health`, and user registration requires
/// a valid bearer token; [`auth_layer`] resolves the token to a
/// [`CurrentUser`] and injects it into request extensions.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: health, login, registration
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/login", post(routes::auth::login))
        .route("/users", post(routes::users::register));

    // Everything else requires a resolved identity
    let protected_routes = Router::new()
        .route("/users", get(routes::users::list_users))
        .route("/users/:id", get(routes::users::get_user))
        .route("/users/:id", patch(routes::users::update_user))
        .route("/users/:id", delete(routes::users::delete_user))
        .route("/boards", post(routes::boards::create_board))
        .route("/boards/mine", get(routes::boards::list_my_boards))
        .route("/boards/:id", get(routes::boards::get_board))
        .route("/boards/:id", patch(routes::boards::update_board))
        .route("/boards/:id", delete(routes::boards::delete_board))
        .route("/lists", post(routes::lists::create_list))
        .route("/lists", get(routes::lists::list_lists))
        .route("/lists/:id", get(routes::lists::get_list))
        .route("/lists/:id", patch(routes::lists::update_list))
        .route("/lists/:id", delete(routes::lists::delete_list))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks/:id", get(routes::tasks::get_task))
        .route("/tasks/:id", patch(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Identity resolution middleware
///
/// Extracts and validates the bearer token from the Authorization header,
/// then loads the user row it refers to. A token whose subject no longer
/// exists is rejected: deleting an account invalidates its outstanding
/// tokens immediately. The resolved [`CurrentUser`] is injected into
/// request extensions for handlers to consume.
async fn auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    // Parse Bearer token; any other scheme is an invalid credential
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Expected Bearer token".to_string())
        })?;

    // Validate token
    let claims = jwt::validate_token(token, state.jwt_secret())?;

    // Resolve the subject to a live user row
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("User no longer exists".to_string())
        })?;

    // Insert into request extensions
    req.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(req).await)
}
