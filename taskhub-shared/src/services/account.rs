/// Account service
///
/// Registration, login and token refresh. Passwords are hashed with
/// Argon2id before they reach the store; login answers an unknown email
/// and a wrong password with the same `Unauthorized` message.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    auth::{
        jwt::{self, Claims, TokenType},
        password::{hash_password, verify_password},
    },
    error::{ServiceError, ServiceResult},
    models::user::{normalize_email, CreateUser, PublicUser, Role},
    store::Store,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAccount {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    #[serde(default)]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[serde(default)]
    pub password: String,
}

impl NewAccount {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

/// Tokens and profile returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    jwt_secret: Arc<str>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Registers a user with the default role
    ///
    /// # Errors
    ///
    /// - `Validation` for a short name, malformed email or short password
    /// - `Conflict` if the email is already registered
    pub async fn register(&self, input: NewAccount) -> ServiceResult<PublicUser> {
        let input = input.normalized();
        input.validate()?;

        if self.store.find_user_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let user = self
            .store
            .insert_user(CreateUser {
                name: input.name,
                email: input.email,
                password_hash,
                role: Role::User,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Verifies credentials and issues an access/refresh token pair
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<LoginOutcome> {
        let email = normalize_email(email);

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if !valid {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.issue(&Claims::new(user.id, user.role, TokenType::Access))?;
        let refresh_token = self.issue(&Claims::new(user.id, user.role, TokenType::Refresh))?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome {
            token,
            refresh_token,
            user: user.into(),
        })
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// The user must still exist.
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<String> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.jwt_secret)
            .map_err(|e| ServiceError::Unauthorized(e.to_string()))?;

        let user = self
            .store
            .find_user(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("User no longer exists".to_string()))?;

        self.issue(&Claims::new(user.id, user.role, TokenType::Access))
    }

    fn issue(&self, claims: &Claims) -> ServiceResult<String> {
        jwt::create_token(claims, &self.jwt_secret).map_err(|e| ServiceError::Internal(e.to_string()))
    }
}
