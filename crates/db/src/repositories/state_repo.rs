//! Repository for the seeded `states` directory.

use sqlx::PgExecutor;

use crate::models::state::State;

/// Column list for state queries (severity joined in).
const STATE_COLUMNS: &str = "\
    s.id, s.name, s.severity_id, \
    sv.name AS severity_name, sv.value AS severity_value";

pub struct StateRepo;

impl StateRepo {
    /// Exact, case-sensitive lookup of a state by name.
    pub async fn find_by_name(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<State>, sqlx::Error> {
        let query = format!(
            "SELECT {STATE_COLUMNS} FROM states s \
             JOIN severities sv ON sv.id = s.severity_id \
             WHERE s.name = $1"
        );
        sqlx::query_as::<_, State>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// List all seeded states ordered by severity, then name.
    pub async fn list_all(executor: impl PgExecutor<'_>) -> Result<Vec<State>, sqlx::Error> {
        let query = format!(
            "SELECT {STATE_COLUMNS} FROM states s \
             JOIN severities sv ON sv.id = s.severity_id \
             ORDER BY sv.value, s.name"
        );
        sqlx::query_as::<_, State>(&query).fetch_all(executor).await
    }
}
