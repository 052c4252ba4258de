pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /users                           create user (admin only)
///
/// /hosts/{name}                    ingest host report (PATCH)
/// /entities/{name}/livestates      livestate history
///
/// /states                          list states (with severities)
/// /metric-types                    list metric types
/// /metric-types/{id}               get metric type
/// ```
///
/// All routes except `/auth/login` require a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/users", post(handlers::auth::create_user))
        .route("/hosts/{name}", patch(handlers::hosts::ingest_host))
        .route(
            "/entities/{name}/livestates",
            get(handlers::entities::livestate_history),
        )
        .route("/states", get(handlers::states::list_states))
        .route("/metric-types", get(handlers::metric_types::list_metric_types))
        .route(
            "/metric-types/{id}",
            get(handlers::metric_types::get_metric_type),
        )
}
