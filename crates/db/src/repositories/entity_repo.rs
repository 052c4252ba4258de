//! Repository for the `entities` table.
//!
//! Entities are the nodes of the monitored-object hierarchy. The core
//! never updates or deletes them; resolution during ingestion only ever
//! reads existing rows or inserts new ones.

use sqlx::{PgExecutor, Postgres, Transaction};
use watchpost_core::types::DbId;

use crate::models::entity::{CreateEntity, Entity};

/// Column list for `entities` queries.
const ENTITY_COLUMNS: &str = "\
    id, name, alias, kind_id, parent_id, is_monitored, is_template, \
    is_auto_acknowledge, is_expirable, heartbeat_interval, \
    checkall_interval, created_at, updated_at";

pub struct EntityRepo;

impl EntityRepo {
    /// Find an entity by its globally unique name (exact match).
    pub async fn find_by_name(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<Entity>, sqlx::Error> {
        let query = format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE name = $1");
        sqlx::query_as::<_, Entity>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Find an entity by id.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Entity>, sqlx::Error> {
        let query = format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE id = $1");
        sqlx::query_as::<_, Entity>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Insert an entity, converging on the existing row if the name is
    /// already taken.
    ///
    /// Uses `ON CONFLICT (name) DO NOTHING` plus a re-select so that two
    /// callers racing to create the same name both end up with the same
    /// row instead of one of them surfacing a unique violation.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateEntity,
    ) -> Result<Entity, sqlx::Error> {
        let insert_query = format!(
            "INSERT INTO entities (name, kind_id, parent_id, is_monitored) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (name) DO NOTHING \
             RETURNING {ENTITY_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Entity>(&insert_query)
            .bind(&input.name)
            .bind(input.kind.id())
            .bind(input.parent_id)
            .bind(input.is_monitored)
            .fetch_optional(&mut **tx)
            .await?;

        match inserted {
            Some(entity) => Ok(entity),
            // Lost the race (or the row predates us): the name now
            // resolves to somebody's row, return that one.
            None => {
                let select_query =
                    format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE name = $1");
                sqlx::query_as::<_, Entity>(&select_query)
                    .bind(&input.name)
                    .fetch_one(&mut **tx)
                    .await
            }
        }
    }

    /// Length of the parent chain starting at `id`, capped at `bound`.
    ///
    /// A well-formed chain terminates at the root and returns its true
    /// length; a chain that reaches `bound` is either deeper than the
    /// allowed hierarchy or cyclic, and callers must reject the insert.
    pub async fn ancestor_depth(
        executor: impl PgExecutor<'_>,
        id: DbId,
        bound: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "WITH RECURSIVE chain AS ( \
                 SELECT id, parent_id, 1::bigint AS depth \
                 FROM entities WHERE id = $1 \
                 UNION ALL \
                 SELECT e.id, e.parent_id, c.depth + 1 \
                 FROM entities e \
                 JOIN chain c ON e.id = c.parent_id \
                 WHERE c.depth < $2 \
             ) \
             SELECT COALESCE(MAX(depth), 0) FROM chain",
        )
        .bind(id)
        .bind(bound)
        .fetch_one(executor)
        .await
    }
}
