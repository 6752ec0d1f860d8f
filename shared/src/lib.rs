//! # Reactor Shared
//! Common types shared by the reactor client crates: keys, ownership rules,
//! component states, spawn parameters and runtime events.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(feature = "bevy_support")] {
        pub use bevy_ecs;
    }
}

mod component_state;
mod error;
mod events;
mod key;
mod ownership_rule;
mod permissions;
mod spawn_params;
mod types;

pub use component_state::{BodyType2D, ComponentKind, ComponentState};
pub use error::{RuleError, SpawnParamsError};
pub use events::{DestroyReason, RuntimeEvent};
pub use key::{
    AutoSpawnKey, ComponentKey, EntityKey, Key, KeyGenerator, ManagerKey, NodeKey, RoomKey,
};
pub use ownership_rule::{OwnershipRule, RuleAction};
pub use permissions::OwnerPermissions;
pub use spawn_params::{ClientSpawnParams, EntityBinding, ScaleMode, SpawnTransform};
pub use types::{is_local_owner, AssetId, PlayerId, SceneId};

pub use glam::{Quat, Vec2, Vec3};
