//! Entity resolution: find-or-create nodes of the realm -> host ->
//! service hierarchy.
//!
//! Resolution is idempotent: an existing entity is returned exactly as
//! stored, its placement and flags untouched. Only absent entities are
//! created, and creation converges on the winner's row if another
//! ingestion call races on the same name.

use sqlx::{Postgres, Transaction};
use watchpost_core::error::CoreError;
use watchpost_core::hierarchy::{
    service_entity_name, EntityKind, MAX_HIERARCHY_DEPTH, ROOT_ENTITY_ID,
};
use watchpost_core::report::{HostReport, ServiceReport};
use watchpost_db::models::entity::{CreateEntity, Entity};
use watchpost_db::repositories::EntityRepo;

use crate::error::AppResult;

/// Resolve or create the host entity for a report.
///
/// When the host has to be created, its parent realm is resolved first:
/// the realm named in the report's template block (created under root
/// if absent), or the root realm itself when the report names none.
pub(super) async fn resolve_host(
    tx: &mut Transaction<'_, Postgres>,
    report: &HostReport,
) -> AppResult<Entity> {
    if let Some(existing) = EntityRepo::find_by_name(&mut **tx, &report.name).await? {
        return Ok(existing);
    }

    let realm = resolve_realm(tx, report.realm_hint()).await?;

    attach(
        tx,
        CreateEntity {
            name: report.name.clone(),
            kind: EntityKind::Host,
            parent_id: Some(realm.id),
            is_monitored: report.passive_checks_enabled,
        },
    )
    .await
}

/// Resolve or create a service entity under its host.
///
/// The stored name is host-qualified (`"<host>||<service>"`) so the
/// same service name on two hosts yields two distinct entities.
pub(super) async fn resolve_service(
    tx: &mut Transaction<'_, Postgres>,
    host: &Entity,
    report: &ServiceReport,
) -> AppResult<Entity> {
    let qualified = service_entity_name(&host.name, &report.name);

    if let Some(existing) = EntityRepo::find_by_name(&mut **tx, &qualified).await? {
        return Ok(existing);
    }

    attach(
        tx,
        CreateEntity {
            name: qualified,
            kind: EntityKind::Service,
            parent_id: Some(host.id),
            is_monitored: report.passive_checks_enabled,
        },
    )
    .await
}

/// Resolve the realm a new host should live under.
async fn resolve_realm(
    tx: &mut Transaction<'_, Postgres>,
    hint: Option<&str>,
) -> AppResult<Entity> {
    let Some(realm_name) = hint else {
        return root_entity(tx).await;
    };

    if let Some(existing) = EntityRepo::find_by_name(&mut **tx, realm_name).await? {
        return Ok(existing);
    }

    let root = root_entity(tx).await?;
    attach(
        tx,
        CreateEntity {
            name: realm_name.to_string(),
            kind: EntityKind::Realm,
            parent_id: Some(root.id),
            is_monitored: false,
        },
    )
    .await
}

/// Fetch the reserved root entity. Its absence means the store was
/// never seeded, which is a deployment fault, not a client one.
async fn root_entity(tx: &mut Transaction<'_, Postgres>) -> AppResult<Entity> {
    EntityRepo::find_by_id(&mut **tx, ROOT_ENTITY_ID)
        .await?
        .ok_or_else(|| CoreError::Internal("root entity is missing from the store".into()).into())
}

/// Create an entity after checking that attaching it keeps the
/// hierarchy a bounded tree.
///
/// The parent chain is measured from the parent: a chain that reaches
/// the depth bound is either too deep or cyclic, and a parent with no
/// chain at all no longer exists. Both reject the insert instead of
/// corrupting the hierarchy.
async fn attach(
    tx: &mut Transaction<'_, Postgres>,
    input: CreateEntity,
) -> AppResult<Entity> {
    if let Some(parent_id) = input.parent_id {
        let depth = EntityRepo::ancestor_depth(&mut **tx, parent_id, MAX_HIERARCHY_DEPTH).await?;
        if depth == 0 {
            return Err(
                CoreError::Internal(format!("parent entity {parent_id} does not exist")).into(),
            );
        }
        if depth >= MAX_HIERARCHY_DEPTH {
            return Err(CoreError::Validation(format!(
                "cannot attach '{}': entity hierarchy exceeds depth {MAX_HIERARCHY_DEPTH}",
                input.name
            ))
            .into());
        }
    }

    let entity = EntityRepo::create(tx, &input).await?;
    tracing::debug!(name = %entity.name, kind = ?input.kind, "Resolved new entity");
    Ok(entity)
}
