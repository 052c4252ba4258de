//! Handler for the host-report ingestion resource.

use axum::extract::{Path, State};
use axum::Json;
use watchpost_core::error::CoreError;
use watchpost_core::report::{HostFeedback, HostReport};

use crate::engine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Envelope;
use crate::state::AppState;

/// PATCH /api/v1/hosts/{name}
///
/// Ingest one passive host report. The path names the host; a `name`
/// in the body is accepted for protocol compatibility but must match.
/// Returns the host's monitoring feedback in the response envelope.
pub async fn ingest_host(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(name): Path<String>,
    Json(mut report): Json<HostReport>,
) -> AppResult<Json<Envelope<HostFeedback>>> {
    if report.name.is_empty() {
        report.name = name;
    } else if report.name != name {
        return Err(CoreError::Validation(format!(
            "body host name '{}' does not match path host name '{name}'",
            report.name
        ))
        .into());
    }

    let feedback = engine::ingest(&state.pool, &report).await?;
    Ok(Json(Envelope::feedback(feedback)))
}
