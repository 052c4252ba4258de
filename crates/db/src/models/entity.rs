//! Entity rows: the nodes of the monitored-object hierarchy.

use serde::Serialize;
use sqlx::FromRow;
use watchpost_core::hierarchy::EntityKind;
use watchpost_core::types::{DbId, Timestamp};

/// A row from the `entities` table.
///
/// `parent_id` is a self-reference forming the realm -> host -> service
/// tree, terminating at the reserved root realm.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entity {
    pub id: DbId,
    pub name: String,
    pub alias: Option<String>,
    pub kind_id: i16,
    pub parent_id: Option<DbId>,
    pub is_monitored: bool,
    pub is_template: bool,
    pub is_auto_acknowledge: bool,
    pub is_expirable: bool,
    /// Freshness threshold in seconds.
    pub heartbeat_interval: i32,
    /// Check interval in minutes.
    pub checkall_interval: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity {
    /// The entity's kind, if the stored id is one of the seeded kinds.
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::try_from(self.kind_id).ok()
    }
}

/// DTO for creating a new entity.
///
/// Flags not present here take their column defaults (not a template,
/// no auto-acknowledge, expirable, heartbeat 1200s, checkall 60min).
#[derive(Debug, Clone)]
pub struct CreateEntity {
    pub name: String,
    pub kind: EntityKind,
    pub parent_id: Option<DbId>,
    pub is_monitored: bool,
}
