/// Authentication endpoints
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Exchange credentials for tokens
/// - `POST /auth/refresh` - Exchange a refresh token for an access token

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskhub_shared::{
    models::user::PublicUser,
    services::{LoginOutcome, NewAccount},
};

use crate::{app::AppState, error::ApiResult, extract::ApiJson};

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub token: String,
}

/// Registers a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "name": "Test User", "email": "test@example.com", "password": "Test@123" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: name, email or password invalid
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewAccount>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state.accounts.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Logs a user in
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "refreshToken": "eyJ...",
///   "user": { "id": "uuid", "name": "Test User", "email": "test@example.com", ... }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginOutcome>> {
    let outcome = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(outcome))
}

/// Exchanges a refresh token for a new access token
///
/// # Errors
///
/// - `401 Unauthorized`: invalid, expired or non-refresh token
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let token = state.accounts.refresh(&req.refresh_token).await?;
    Ok(Json(RefreshResponse { token }))
}
