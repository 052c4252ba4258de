//! Repository for `livestates` and `metrics`.
//!
//! Both tables are append-only history: there are no update or delete
//! operations here by design. The current status of an entity is simply
//! its most recent livestate by timestamp.

use sqlx::{PgExecutor, Postgres, Transaction};
use watchpost_core::types::DbId;

use crate::models::livestate::{CreateLivestate, CreateMetric, Livestate, Metric};

/// Column list for `livestates` queries.
const LIVESTATE_COLUMNS: &str = "\
    id, entity_id, state_id, timestamp, output, long_output, \
    is_acknowledged, created_at";

/// Column list for `metrics` queries.
const METRIC_COLUMNS: &str = "id, livestate_id, metric_type_id, name, value, timestamp";

pub struct LivestateRepo;

impl LivestateRepo {
    /// Append one livestate to an entity's history.
    pub async fn append(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateLivestate,
    ) -> Result<Livestate, sqlx::Error> {
        let query = format!(
            "INSERT INTO livestates \
                 (entity_id, state_id, timestamp, output, long_output, is_acknowledged) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LIVESTATE_COLUMNS}"
        );
        sqlx::query_as::<_, Livestate>(&query)
            .bind(input.entity_id)
            .bind(input.state_id)
            .bind(input.timestamp)
            .bind(&input.output)
            .bind(&input.long_output)
            .bind(input.is_acknowledged)
            .fetch_one(&mut **tx)
            .await
    }

    /// Append one metric to a livestate.
    pub async fn append_metric(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateMetric,
    ) -> Result<Metric, sqlx::Error> {
        let query = format!(
            "INSERT INTO metrics (livestate_id, metric_type_id, name, value, timestamp) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {METRIC_COLUMNS}"
        );
        sqlx::query_as::<_, Metric>(&query)
            .bind(input.livestate_id)
            .bind(input.metric_type_id)
            .bind(&input.name)
            .bind(input.value)
            .bind(input.timestamp)
            .fetch_one(&mut **tx)
            .await
    }

    /// The most recent livestate of an entity, if it has any history.
    pub async fn latest_for_entity(
        executor: impl PgExecutor<'_>,
        entity_id: DbId,
    ) -> Result<Option<Livestate>, sqlx::Error> {
        let query = format!(
            "SELECT {LIVESTATE_COLUMNS} FROM livestates \
             WHERE entity_id = $1 \
             ORDER BY timestamp DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Livestate>(&query)
            .bind(entity_id)
            .fetch_optional(executor)
            .await
    }

    /// An entity's history, most recent first.
    pub async fn history_for_entity(
        executor: impl PgExecutor<'_>,
        entity_id: DbId,
        limit: i64,
    ) -> Result<Vec<Livestate>, sqlx::Error> {
        let query = format!(
            "SELECT {LIVESTATE_COLUMNS} FROM livestates \
             WHERE entity_id = $1 \
             ORDER BY timestamp DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Livestate>(&query)
            .bind(entity_id)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// All metrics attached to a livestate, in insertion order.
    pub async fn metrics_for_livestate(
        executor: impl PgExecutor<'_>,
        livestate_id: DbId,
    ) -> Result<Vec<Metric>, sqlx::Error> {
        let query = format!(
            "SELECT {METRIC_COLUMNS} FROM metrics \
             WHERE livestate_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Metric>(&query)
            .bind(livestate_id)
            .fetch_all(executor)
            .await
    }
}
