use std::default::Default;

use reactor_shared::OwnerPermissions;

use crate::ownership::{AUTO_SPAWN_TYPE_NAME, OWNERSHIP_MANAGER_TYPE_NAME};

/// Contains Config properties for a single auto-spawned placeholder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoSpawnConfig {
    /// If true, the entity is spawned with the local player as its owner
    pub spawn_owned: bool,
    /// Permissions granted to the owner when `spawn_owned` is set
    pub owner_permissions: OwnerPermissions,
}

impl Default for AutoSpawnConfig {
    fn default() -> Self {
        Self {
            spawn_owned: true,
            owner_permissions: OwnerPermissions::ALL,
        }
    }
}

/// Contains Config properties which will be used by the Client
#[cfg_attr(feature = "bevy_support", derive(bevy_ecs::prelude::Resource))]
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Used for auto-spawns registered without an explicit config
    pub auto_spawn: AutoSpawnConfig,
    /// Component type names ownership managers never touch
    pub hidden_component_types: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auto_spawn: AutoSpawnConfig::default(),
            hidden_component_types: vec![
                AUTO_SPAWN_TYPE_NAME.to_string(),
                OWNERSHIP_MANAGER_TYPE_NAME.to_string(),
            ],
        }
    }
}
