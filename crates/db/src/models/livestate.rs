//! Livestate history and metric rows. Both tables are append-only.

use serde::Serialize;
use sqlx::FromRow;
use watchpost_core::types::{DbId, Timestamp};

/// A row from the `livestates` table: one immutable status snapshot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Livestate {
    pub id: DbId,
    pub entity_id: DbId,
    pub state_id: i16,
    pub timestamp: Timestamp,
    pub output: Option<String>,
    pub long_output: Option<String>,
    pub is_acknowledged: bool,
    pub created_at: Timestamp,
}

/// DTO for appending a livestate.
#[derive(Debug, Clone)]
pub struct CreateLivestate {
    pub entity_id: DbId,
    pub state_id: i16,
    pub timestamp: Timestamp,
    pub output: Option<String>,
    pub long_output: Option<String>,
    pub is_acknowledged: bool,
}

/// A row from the `metrics` table: one measurement of one livestate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Metric {
    pub id: DbId,
    pub livestate_id: DbId,
    pub metric_type_id: i16,
    pub name: String,
    pub value: Option<f64>,
    /// Copied from the owning livestate at insertion.
    pub timestamp: Timestamp,
}

/// DTO for appending a metric to a livestate.
#[derive(Debug, Clone)]
pub struct CreateMetric {
    pub livestate_id: DbId,
    pub metric_type_id: i16,
    pub name: String,
    pub value: f64,
    pub timestamp: Timestamp,
}
