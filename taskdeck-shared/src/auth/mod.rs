/// Authentication and authorization for TaskDeck
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`ownership`]: The ownership authorization engine gating every
///   per-resource operation
/// - [`guard`]: Composable access-check predicates (admin-only,
///   self-or-admin) for the user endpoints
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
/// use taskdeck_shared::auth::jwt::{create_token, Claims};
/// use taskdeck_shared::models::user::UserRole;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(1, "ann@example.com".to_string(), UserRole::User, 3600);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};

use crate::models::user::{User, UserRole};

pub mod guard;
pub mod jwt;
pub mod ownership;
pub mod password;

/// The authenticated user for the current request
///
/// Built by the authentication middleware after the bearer token has been
/// verified and the user row loaded. Carries everything handlers need and
/// nothing secret: the password hash is stripped at construction. Passed
/// explicitly into handlers via request extensions, never through globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID (the token's subject)
    pub id: i64,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Account role
    pub role: UserRole,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_current_user_strips_hash() {
        let user = User {
            id: 7,
            email: "ann@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Ann".to_string(),
            role: UserRole::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let current = CurrentUser::from(user);
        assert_eq!(current.id, 7);
        assert_eq!(current.role, UserRole::Admin);

        let json = serde_json::to_string(&current).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
