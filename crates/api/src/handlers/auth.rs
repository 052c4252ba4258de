//! Handlers for login and user administration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use watchpost_core::error::CoreError;
use watchpost_db::models::user::CreateUser;
use watchpost_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::Envelope;
use crate::state::AppState;

/// Minimum accepted password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Public user info returned after user creation.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns the access token in
/// the envelope's `_result` list, matching the historical protocol.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<Envelope<Vec<String>>>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(CoreError::Unauthorized("Invalid username or password".into()).into());
    }

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let token = generate_access_token(user.id, &role_name, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    tracing::info!(username = %user.username, "User logged in");
    Ok(Json(Envelope::result(vec![token])))
}

/// POST /api/v1/users
///
/// Create a user account. Admin only. New accounts get the admin role;
/// finer-grained roles are an administrative concern outside this API.
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<Envelope<UserInfo>>)> {
    user.require_admin()?;

    if input.username.is_empty() {
        return Err(CoreError::Validation("username must not be empty".into()).into());
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let role = RoleRepo::find_by_name(&state.pool, "admin")
        .await?
        .ok_or_else(|| CoreError::Internal("admin role is missing from the store".into()))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(format!("Password hashing error: {e}")))?;

    // A duplicate username trips uq_users_username and maps to 409.
    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(username = %created.username, created_by = user.user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::feedback(UserInfo {
            username: created.username,
        })),
    ))
}
