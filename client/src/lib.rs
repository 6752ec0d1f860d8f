//! # Reactor Client
//! Client-side spawn authority and ownership rules for networked entities.
//! Placeholders auto-spawn into the right room once one is available, and
//! ownership managers enable, disable or destroy nodes and components
//! whenever the local player gains or loses ownership of an entity.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use reactor_shared::{
        is_local_owner, AssetId, AutoSpawnKey, BodyType2D, ClientSpawnParams, ComponentKey,
        ComponentKind, ComponentState, DestroyReason, EntityBinding, EntityKey, Key, ManagerKey,
        NodeKey, OwnerPermissions, OwnershipRule, PlayerId, Quat, RoomKey, RuleAction, RuleError,
        RuntimeEvent, ScaleMode, SceneId, SpawnParamsError, SpawnTransform, Vec2, Vec3,
    };
}

mod client;
mod config;
mod error;
mod events;
mod ownership;
mod spawn;
mod subscriptions;
mod warning;
mod world;

pub use client::Client;
pub use config::{AutoSpawnConfig, ClientConfig};
pub use error::ClientError;
pub use events::{
    AutoSpawnDisabledEvent, AutoSpawnedEvent, ClientEvent, ClientEvents, RequeuedEvent,
    RulesAppliedEvent,
};
pub use ownership::{
    ComponentRegistry, DisabledObjects, DisabledTarget, ManagerState, OwnershipManager,
    OwnershipRules, RulesOutcome, AUTO_SPAWN_TYPE_NAME, OWNERSHIP_MANAGER_TYPE_NAME,
};
pub use spawn::{
    AutoSpawn, AutoSpawnController, AutoSpawnState, DestroyOutcome, SpawnOutcome, SpawnRequest,
    SpawnWaitlist,
};
pub use subscriptions::{Subscriber, Subscriptions, Topic};
pub use warning::ConfigWarning;
pub use world::{
    find_ancestor_room, find_entity_binding_node, is_locally_owned, local_player_id, ClientWorld,
    EntityInfo, EntityRuntime, HostWorld, RigidBodyWrapper, RoomInfo,
};
