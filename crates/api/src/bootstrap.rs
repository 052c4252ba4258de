//! Startup bootstrap: create the initial admin account.
//!
//! Schema and directory seed data live in migrations, but users cannot:
//! argon2id hashes are salted per-account and cannot be precomputed in
//! SQL. Instead, when the users table is empty at startup and
//! `ADMIN_USERNAME` / `ADMIN_PASSWORD` are set, the initial admin is
//! created here.

use watchpost_core::error::CoreError;
use watchpost_db::models::user::CreateUser;
use watchpost_db::repositories::{RoleRepo, UserRepo};
use watchpost_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Ensure an admin account exists.
///
/// No-op when any user already exists. When the table is empty and the
/// `ADMIN_USERNAME` / `ADMIN_PASSWORD` env vars are unset, only a
/// warning is logged: the server still serves reports it cannot
/// authenticate, which is a misconfiguration worth surfacing loudly.
pub async fn ensure_admin_user(pool: &DbPool) -> AppResult<()> {
    if UserRepo::count_all(pool).await? > 0 {
        return Ok(());
    }

    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::warn!(
            "No users exist and ADMIN_USERNAME/ADMIN_PASSWORD are not set; \
             no one will be able to authenticate"
        );
        return Ok(());
    };

    let role = RoleRepo::find_by_name(pool, "admin")
        .await?
        .ok_or_else(|| CoreError::Internal("admin role is missing from the store".into()))?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::Internal(format!("Failed to hash admin password: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username,
            email: None,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(username = %user.username, "Created initial admin user");
    Ok(())
}
