//! Read-only handler for the seeded state directory.

use axum::extract::State;
use axum::Json;
use watchpost_db::repositories::StateRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /api/v1/states
///
/// The seeded states with their severities, lowest severity first.
pub async fn list_states(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Envelope<Vec<watchpost_db::models::state::State>>>> {
    let states = StateRepo::list_all(&state.pool).await?;
    Ok(Json(Envelope::feedback(states)))
}
