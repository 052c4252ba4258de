//! Seeded state and metric-type directory rows.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `states` table, joined with its severity.
///
/// The severity columns ride along so callers can rank states without a
/// second query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct State {
    pub id: i16,
    pub name: String,
    pub severity_id: i16,
    pub severity_name: String,
    pub severity_value: i32,
}

/// A row from the `metric_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MetricType {
    pub id: i16,
    pub name: String,
    pub description: Option<String>,
}
