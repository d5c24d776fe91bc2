/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
/// - [`jwt`]: access and refresh token issuance and validation
/// - [`context`]: the authenticated requester carried through a request
///
/// # Example
///
/// ```
/// use taskhub_shared::auth::password::{hash_password, verify_password};
/// use taskhub_shared::auth::jwt::{create_token, validate_access_token, Claims, TokenType};
/// use taskhub_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let secret = "secret-key-that-is-at-least-32-bytes";
/// let claims = Claims::new(Uuid::new_v4(), Role::User, TokenType::Access);
/// let token = create_token(&claims, secret)?;
/// assert!(validate_access_token(&token, secret).is_ok());
/// # Ok(())
/// # }
/// ```

pub mod context;
pub mod jwt;
pub mod password;
