/// Composable access-check predicates
///
/// Route-level authorization on the user endpoints is expressed as small
/// predicates over the authenticated [`CurrentUser`] that compose with
/// [`AnyOf`] and [`AllOf`]. Everything is deny-by-default: an empty
/// combinator admits nobody unless it is an `AllOf`, whose vacuous truth is
/// the conventional reading.
///
/// Ownership of boards, lists, and tasks is NOT checked here. Those
/// decisions need the database and live in [`super::ownership`]; these
/// predicates only decide on facts already present in the request identity.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::{CurrentUser, guard::{AccessCheck, AnyOf, IsAdmin, IsSelf}};
/// use taskdeck_shared::models::user::UserRole;
///
/// let user = CurrentUser {
///     id: 7,
///     email: "ann@example.com".to_string(),
///     name: "Ann".to_string(),
///     role: UserRole::User,
/// };
///
/// // "self or admin" for user id 7
/// let check = AnyOf::new(vec![Box::new(IsAdmin), Box::new(IsSelf(7))]);
/// assert!(check.allows(&user));
/// ```

use crate::auth::CurrentUser;
use crate::models::user::UserRole;

/// A predicate over the authenticated user
///
/// Implementations must be pure: same user in, same answer out.
pub trait AccessCheck: Send + Sync {
    /// Returns true if `user` passes this check
    fn allows(&self, user: &CurrentUser) -> bool;
}

/// Passes only for users with the ADMIN role
#[derive(Debug, Clone, Copy)]
pub struct IsAdmin;

impl AccessCheck for IsAdmin {
    fn allows(&self, user: &CurrentUser) -> bool {
        user.role == UserRole::Admin
    }
}

/// Passes only when the authenticated user IS the user with this id
#[derive(Debug, Clone, Copy)]
pub struct IsSelf(pub i64);

impl AccessCheck for IsSelf {
    fn allows(&self, user: &CurrentUser) -> bool {
        user.id == self.0
    }
}

/// Passes when ANY inner check passes
///
/// Short-circuits on the first success. Empty means deny.
pub struct AnyOf {
    checks: Vec<Box<dyn AccessCheck>>,
}

impl AnyOf {
    pub fn new(checks: Vec<Box<dyn AccessCheck>>) -> Self {
        Self { checks }
    }
}

impl AccessCheck for AnyOf {
    fn allows(&self, user: &CurrentUser) -> bool {
        self.checks.iter().any(|c| c.allows(user))
    }
}

/// Passes when ALL inner checks pass
///
/// Short-circuits on the first failure. Empty means allow.
pub struct AllOf {
    checks: Vec<Box<dyn AccessCheck>>,
}

impl AllOf {
    pub fn new(checks: Vec<Box<dyn AccessCheck>>) -> Self {
        Self { checks }
    }
}

impl AccessCheck for AllOf {
    fn allows(&self, user: &CurrentUser) -> bool {
        self.checks.iter().all(|c| c.allows(user))
    }
}

/// Convenience constructor for the common "self or admin" gate
pub fn self_or_admin(user_id: i64) -> AnyOf {
    AnyOf::new(vec![Box::new(IsAdmin), Box::new(IsSelf(user_id))])
}
