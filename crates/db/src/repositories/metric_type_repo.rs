//! Repository for the seeded `metric_types` directory.

use crate::models::state::MetricType;
use sqlx::PgExecutor;

const METRIC_TYPE_COLUMNS: &str = "id, name, description";

pub struct MetricTypeRepo;

impl MetricTypeRepo {
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: i16,
    ) -> Result<Option<MetricType>, sqlx::Error> {
        let query = format!("SELECT {METRIC_TYPE_COLUMNS} FROM metric_types WHERE id = $1");
        sqlx::query_as::<_, MetricType>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_name(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<MetricType>, sqlx::Error> {
        let query = format!("SELECT {METRIC_TYPE_COLUMNS} FROM metric_types WHERE name = $1");
        sqlx::query_as::<_, MetricType>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_all(
        executor: impl PgExecutor<'_>,
    ) -> Result<Vec<MetricType>, sqlx::Error> {
        let query = format!("SELECT {METRIC_TYPE_COLUMNS} FROM metric_types ORDER BY id");
        sqlx::query_as::<_, MetricType>(&query)
            .fetch_all(executor)
            .await
    }
}
