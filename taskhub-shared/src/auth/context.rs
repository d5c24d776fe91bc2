/// Authenticated requester
///
/// The API's JWT layer validates the bearer token and inserts an
/// [`AuthContext`] into the request extensions. Handlers extract it with
/// `Extension<AuthContext>` and pass `user_id` to the services as the
/// owner for every scoped query.
///
/// # Example
///
/// ```
/// use taskhub_shared::auth::context::AuthContext;
/// use taskhub_shared::auth::jwt::{Claims, TokenType};
/// use taskhub_shared::models::user::Role;
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, Role::User, TokenType::Access);
///
/// let auth = AuthContext::from_claims(&claims);
/// assert_eq!(auth.user_id, user_id);
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;
use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Role from the access token
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Creates the context from validated access token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.sub, claims.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
