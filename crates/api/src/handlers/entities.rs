//! Read-side handlers for entities and their livestate history.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use watchpost_core::error::CoreError;
use watchpost_db::models::livestate::Livestate;
use watchpost_db::repositories::{EntityRepo, LivestateRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Envelope;
use crate::state::AppState;

/// Default page size for history listing.
const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for history listing.
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/entities/{name}/livestates
///
/// An entity's livestate history, most recent first. The entity name is
/// the globally unique one (services are `"<host>||<service>"`).
pub async fn livestate_history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(name): Path<String>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<Envelope<Vec<Livestate>>>> {
    let entity = EntityRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            kind: "entity",
            name,
        })?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let history = LivestateRepo::history_for_entity(&state.pool, entity.id, limit).await?;

    Ok(Json(Envelope::feedback(history)))
}
