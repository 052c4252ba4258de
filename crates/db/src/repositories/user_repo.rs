//! Repositories for `users` and `roles` (API authentication).

use sqlx::PgExecutor;
use watchpost_core::types::DbId;

use crate::models::user::{CreateUser, Role, User};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role_id, is_active, created_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_username(
        executor: impl PgExecutor<'_>,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(executor)
            .await
    }

    /// Insert a user. A duplicate username violates `uq_users_username`
    /// and surfaces as a database error for the caller to classify.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(executor)
            .await
    }

    /// Total number of user accounts (used by startup bootstrap).
    pub async fn count_all(executor: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await
    }
}

pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_by_name(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Resolve a role id to its name for JWT claims.
    pub async fn resolve_name(
        executor: impl PgExecutor<'_>,
        role_id: DbId,
    ) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(executor)
            .await
    }
}
