use reactor_shared::{EntityKey, NodeKey, OwnerPermissions};

use crate::{config::AutoSpawnConfig, warning::ConfigWarning, world::HostWorld};

/// Where an auto-spawn currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoSpawnState {
    /// Not queued and not bound to an entity.
    Idle,
    /// Waiting in the spawn waitlist for a room.
    Queued,
    /// The placeholder node is bound to a live entity.
    Bound,
    /// Switched off. Nothing happens until the host re-enables it.
    Disabled,
}

/// A placeholder node that spawns itself as a networked entity once a room
/// can take it.
#[derive(Clone, Debug)]
pub struct AutoSpawn {
    node: NodeKey,
    config: AutoSpawnConfig,
    enabled: bool,
    entity: Option<EntityKey>,
}

impl AutoSpawn {
    pub fn new(node: NodeKey, config: AutoSpawnConfig) -> Self {
        Self {
            node,
            config,
            enabled: true,
            entity: None,
        }
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn config(&self) -> &AutoSpawnConfig {
        &self.config
    }

    /// Owner permissions to request, or `None` to spawn unowned.
    pub fn requested_permissions(&self) -> Option<OwnerPermissions> {
        if self.config.spawn_owned {
            Some(self.config.owner_permissions)
        } else {
            None
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The entity whose destruction this auto-spawn is watching.
    pub fn observed_entity(&self) -> Option<EntityKey> {
        self.entity
    }

    pub(crate) fn observe(&mut self, entity: Option<EntityKey>) {
        self.entity = entity;
    }

    /// Enabled and active in the host hierarchy.
    pub fn is_active<W: HostWorld + ?Sized>(&self, world: &W) -> bool {
        self.enabled && world.is_active_in_hierarchy(self.node)
    }

    /// True when the node has an unbound, non-permanent entity binding with
    /// an asset id.
    pub fn is_spawnable<W: HostWorld + ?Sized>(&self, world: &W) -> bool {
        world.entity_binding(self.node).is_some_and(|binding| {
            !binding.is_attached() && binding.asset_id != 0 && !binding.permanent
        })
    }

    /// Describes why this auto-spawn can never spawn anything, if it can't.
    pub fn configuration_warning<W: HostWorld + ?Sized>(&self, world: &W) -> Option<ConfigWarning> {
        let Some(binding) = world.entity_binding(self.node) else {
            return Some(ConfigWarning::MissingEntityBinding);
        };
        if binding.asset_id == 0 {
            return Some(ConfigWarning::MissingAssetId);
        }
        if binding.permanent {
            return Some(ConfigWarning::PermanentEntity);
        }
        None
    }
}
