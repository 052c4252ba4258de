//! Vocabulary of the monitored-entity hierarchy.
//!
//! The hierarchy is a tree of entities: a single reserved root realm
//! ("All") with realms beneath it, hosts beneath realms, and services
//! beneath hosts. Service entities carry a host-qualified name so that
//! two hosts can each expose a service with the same local name.

use crate::types::DbId;

/// Name of the single pre-seeded root entity.
pub const ROOT_ENTITY_NAME: &str = "All";

/// Reserved id of the root entity (seeded by migration, never reassigned).
pub const ROOT_ENTITY_ID: DbId = 0;

/// Separator between host name and service name in a service entity name.
pub const SERVICE_NAME_SEPARATOR: &str = "||";

/// Upper bound on parent-chain length accepted when attaching an entity.
///
/// The expected shape is root -> realm -> host -> service (depth 3); the
/// bound leaves headroom for nested realms while still catching a parent
/// chain that fails to terminate.
pub const MAX_HIERARCHY_DEPTH: i64 = 16;

/// Kind of a node in the entity hierarchy.
///
/// Discriminants match the seeded `entity_kinds` rows; `id()` is what
/// gets stored in `entities.kind_id`.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Realm = 0,
    Host = 1,
    Service = 2,
}

impl EntityKind {
    /// Return the database kind id.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Lowercase kind name as seeded in `entity_kinds`.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Realm => "realm",
            EntityKind::Host => "host",
            EntityKind::Service => "service",
        }
    }
}

impl TryFrom<i16> for EntityKind {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EntityKind::Realm),
            1 => Ok(EntityKind::Host),
            2 => Ok(EntityKind::Service),
            other => Err(other),
        }
    }
}

/// Build the globally unique entity name for a service on a host.
///
/// Entity names are unique across the whole hierarchy, so service names
/// are qualified as `"<host>||<service>"`.
pub fn service_entity_name(host_name: &str, service_name: &str) -> String {
    format!("{host_name}{SERVICE_NAME_SEPARATOR}{service_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_name_is_host_qualified() {
        assert_eq!(service_entity_name("host1", "cpu"), "host1||cpu");
    }

    #[test]
    fn same_service_on_two_hosts_gets_distinct_names() {
        assert_ne!(
            service_entity_name("host1", "cpu"),
            service_entity_name("host2", "cpu")
        );
    }

    #[test]
    fn kind_ids_match_seed_rows() {
        assert_eq!(EntityKind::Realm.id(), 0);
        assert_eq!(EntityKind::Host.id(), 1);
        assert_eq!(EntityKind::Service.id(), 2);
    }

    #[test]
    fn kind_roundtrip() {
        for kind in [EntityKind::Realm, EntityKind::Host, EntityKind::Service] {
            assert_eq!(EntityKind::try_from(kind.id()), Ok(kind));
        }
        assert_eq!(EntityKind::try_from(7), Err(7));
    }
}
