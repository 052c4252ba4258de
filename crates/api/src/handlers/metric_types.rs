//! Read-only handlers for the seeded metric-type directory.

use axum::extract::{Path, State};
use axum::Json;
use watchpost_core::error::CoreError;
use watchpost_db::models::state::MetricType;
use watchpost_db::repositories::MetricTypeRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /api/v1/metric-types
pub async fn list_metric_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Envelope<Vec<MetricType>>>> {
    let types = MetricTypeRepo::list_all(&state.pool).await?;
    Ok(Json(Envelope::feedback(types)))
}

/// GET /api/v1/metric-types/{id}
pub async fn get_metric_type(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i16>,
) -> AppResult<Json<Envelope<MetricType>>> {
    let metric_type = MetricTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            kind: "metric type",
            name: id.to_string(),
        })?;
    Ok(Json(Envelope::feedback(metric_type)))
}
