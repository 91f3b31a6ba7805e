/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation and token generation
/// - Request helpers for exercising the router in-process
///
/// Integration tests need a running PostgreSQL instance, configured via
/// `TEST_DATABASE_URL`. When the variable is unset, [`TestContext::try_new`]
/// returns `None` and the test skips itself instead of failing.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskdeck_shared::auth::jwt::{create_token, Claims, DEFAULT_EXPIRY_SECS};
use taskdeck_shared::auth::password::hash_password;
use taskdeck_shared::models::user::{CreateUser, User, UserRole};
use tower::Service as _;

/// Secret used for signing test tokens
pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

static UNIQUE: AtomicU64 = AtomicU64::new(0);

/// Returns a process-unique suffix for emails and titles
pub fn unique_suffix() -> String {
    let n = UNIQUE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", std::process::id(), n)
}

/// Test context containing the router, pool, and created fixtures
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    created_users: Vec<i64>,
}

impl TestContext {
    /// Creates a test context against `TEST_DATABASE_URL`
    ///
    /// Returns `None` when the variable is unset so tests can skip.
    pub async fn try_new() -> anyhow::Result<Option<Self>> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => return Ok(None),
        };

        let db = PgPool::connect(&url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../taskdeck-shared/migrations")
            .run(&db)
            .await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                expires_secs: DEFAULT_EXPIRY_SECS,
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(Some(TestContext {
            db,
            app,
            created_users: Vec::new(),
        }))
    }

    /// Creates a user directly in the database and tracks it for cleanup
    pub async fn create_user(&mut self, name: &str, role: UserRole) -> anyhow::Result<User> {
        let user = User::create(
            &self.db,
            CreateUser {
                email: format!("{}-{}@example.com", name, unique_suffix()),
                password_hash: hash_password("test-password-123")?,
                name: name.to_string(),
            },
        )
        .await?;

        if role == UserRole::Admin {
            sqlx::query("UPDATE users SET role = 'ADMIN' WHERE id = $1")
                .bind(user.id)
                .execute(&self.db)
                .await?;
        }

        self.created_users.push(user.id);

        // Reload so the row reflects the role change
        let user = User::find_by_id(&self.db, user.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("test user vanished"))?;
        Ok(user)
    }

    /// Generates a bearer token for a user
    pub fn token_for(&self, user: &User) -> anyhow::Result<String> {
        let claims = Claims::new(
            user.id,
            user.email.clone(),
            user.role,
            DEFAULT_EXPIRY_SECS,
        );
        Ok(create_token(&claims, TEST_JWT_SECRET)?)
    }

    /// Sends a request through the router, returning status and parsed body
    ///
    /// An empty response body parses as JSON null.
    pub async fn request(
        &mut self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.call(request).await?;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    /// Removes every user this context created; cascades clean up the rest
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        for id in &self.created_users {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.db)
                .await?;
        }
        Ok(())
    }
}

/// Skips the current test when no test database is configured
#[macro_export]
macro_rules! require_test_db {
    () => {
        match common::TestContext::try_new().await.unwrap() {
            Some(ctx) => ctx,
            None => {
                eprintln!("TEST_DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}
