use std::collections::HashMap;

use log::{debug, info, warn};

use reactor_shared::{
    AutoSpawnKey, ClientSpawnParams, DestroyReason, EntityKey, KeyGenerator, NodeKey, RoomKey,
    ScaleMode,
};

use crate::{
    config::AutoSpawnConfig,
    error::ClientError,
    spawn::{
        auto_spawn::{AutoSpawn, AutoSpawnState},
        waitlist::{SpawnRequest, SpawnWaitlist},
    },
    subscriptions::{Subscriber, Subscriptions, Topic},
    world::{find_ancestor_room, ClientWorld},
};

/// Result of a spawn attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned { room: RoomKey, entity: EntityKey },
    /// No room can take the placeholder yet; it waits in the waitlist.
    Queued,
    /// Several connected rooms could take the placeholder. Nothing was done.
    Ambiguous,
    /// The placeholder is bound already, has no asset id, or is permanent.
    NotSpawnable,
    /// The runtime refused to create the entity.
    Rejected,
    /// No room can take the placeholder and it is inactive, so it was not queued.
    Unavailable,
}

/// What an auto-spawn did about the destruction of its entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// The node goes down with the entity, or the auto-spawn is disabled.
    Ignored,
    /// The connection dropped; the placeholder waits for a room again.
    Requeued,
    /// The entity was destroyed on purpose; the auto-spawn switched itself off.
    Disabled,
}

/// Decides whether, where and when each registered placeholder gets spawned.
pub struct AutoSpawnController {
    waitlist: SpawnWaitlist,
    auto_spawns: HashMap<AutoSpawnKey, AutoSpawn>,
    key_generator: KeyGenerator<AutoSpawnKey>,
}

impl AutoSpawnController {
    pub fn new(waitlist: SpawnWaitlist) -> Self {
        Self {
            waitlist,
            auto_spawns: HashMap::new(),
            key_generator: KeyGenerator::new(),
        }
    }

    pub fn waitlist(&self) -> &SpawnWaitlist {
        &self.waitlist
    }

    pub fn get(&self, key: &AutoSpawnKey) -> Option<&AutoSpawn> {
        self.auto_spawns.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &AutoSpawnKey> {
        self.auto_spawns.keys()
    }

    pub fn len(&self) -> usize {
        self.auto_spawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auto_spawns.is_empty()
    }

    /// Registers an auto-spawn for `node` without trying to spawn it.
    ///
    /// A node already bound to an entity is only accepted when the local
    /// player spawned that entity, in which case the auto-spawn starts
    /// watching it for destruction.
    pub fn register<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        subscriptions: &mut Subscriptions,
        node: NodeKey,
        config: AutoSpawnConfig,
    ) -> Result<AutoSpawnKey, ClientError> {
        if !world.has_node(node) {
            return Err(ClientError::NodeNotFound { node });
        }
        let Some(binding) = world.entity_binding(node) else {
            return Err(ClientError::MissingEntityBinding { node });
        };

        let mut auto_spawn = AutoSpawn::new(node, config);
        let bound_entity = binding.entity;
        if let Some(entity) = bound_entity {
            let spawned_locally = world
                .entity(entity)
                .is_some_and(|info| info.spawned_by_local_player);
            if !spawned_locally {
                return Err(ClientError::SpawnedByRemotePlayer { node, entity });
            }
            auto_spawn.observe(Some(entity));
        }

        let key = self.key_generator.generate();
        if let Some(entity) = bound_entity {
            subscriptions.subscribe(Topic::EntityDestroyed(entity), Subscriber::AutoSpawn(key));
        }
        self.auto_spawns.insert(key, auto_spawn);
        Ok(key)
    }

    /// Unregisters the auto-spawn, dropping its waitlist entry and every
    /// subscription it holds.
    pub fn remove(
        &mut self,
        subscriptions: &mut Subscriptions,
        key: &AutoSpawnKey,
    ) -> Option<AutoSpawn> {
        let auto_spawn = self.auto_spawns.remove(key)?;
        self.waitlist.remove(key);
        subscriptions.unsubscribe_all(Subscriber::AutoSpawn(*key));
        self.key_generator.recycle_key(key);
        Some(auto_spawn)
    }

    pub fn state<W: ClientWorld + ?Sized>(
        &self,
        world: &W,
        key: &AutoSpawnKey,
    ) -> Option<AutoSpawnState> {
        let auto_spawn = self.auto_spawns.get(key)?;
        let state = if !auto_spawn.is_enabled() {
            AutoSpawnState::Disabled
        } else if self.waitlist.contains(key) {
            AutoSpawnState::Queued
        } else if world
            .entity_binding(auto_spawn.node())
            .is_some_and(|binding| binding.is_attached())
        {
            AutoSpawnState::Bound
        } else {
            AutoSpawnState::Idle
        };
        Some(state)
    }

    pub fn is_spawnable<W: ClientWorld + ?Sized>(
        &self,
        world: &W,
        key: &AutoSpawnKey,
    ) -> Result<bool, ClientError> {
        let auto_spawn = self.get_or_err(key)?;
        Ok(auto_spawn.is_spawnable(world))
    }

    /// Finds a room for the placeholder and spawns it there, or queues it
    /// until a room becomes available.
    pub fn try_spawn<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        subscriptions: &mut Subscriptions,
        key: &AutoSpawnKey,
    ) -> Result<SpawnOutcome, ClientError> {
        let auto_spawn = self.get_or_err(key)?;
        if !auto_spawn.is_spawnable(world) {
            return Ok(SpawnOutcome::NotSpawnable);
        }
        let node = auto_spawn.node();

        if let Some(room) = find_ancestor_room(world, node) {
            if world.room(room).is_some_and(|info| info.allow_player_spawning) {
                return self.try_spawn_in_room(world, subscriptions, key, room);
            }
        }

        let scene = world.scene(node);
        let mut found_connected_room = false;
        let mut candidate = None;
        for room in world.rooms() {
            let Some(info) = world.room(room) else {
                continue;
            };
            if !info.connected {
                continue;
            }
            found_connected_room = true;
            if !info.allow_player_spawning || info.scene.is_none() || info.scene != scene {
                continue;
            }
            if candidate.is_some() {
                warn!(
                    "Cannot auto-spawn {} because there are multiple connected rooms in the same scene.",
                    world.node_name(node)
                );
                return Ok(SpawnOutcome::Ambiguous);
            }
            candidate = Some(room);
        }

        if let Some(room) = candidate {
            return self.try_spawn_in_room(world, subscriptions, key, room);
        }

        if found_connected_room {
            info!(
                "Cannot auto-spawn {} in any of the connected rooms because none of them are in the same scene with player spawning enabled.",
                world.node_name(node)
            );
        }
        if self.enqueue(world, key) {
            Ok(SpawnOutcome::Queued)
        } else {
            Ok(SpawnOutcome::Unavailable)
        }
    }

    /// Spawns the placeholder into a specific room. The placeholder leaves
    /// the waitlist whatever the outcome.
    pub fn try_spawn_in_room<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        subscriptions: &mut Subscriptions,
        key: &AutoSpawnKey,
        room: RoomKey,
    ) -> Result<SpawnOutcome, ClientError> {
        if !self.auto_spawns.contains_key(key) {
            return Err(ClientError::UnknownAutoSpawn { key: *key });
        }
        Ok(Self::spawn_in_room(
            &mut self.waitlist,
            &mut self.auto_spawns,
            world,
            subscriptions,
            *key,
            room,
        ))
    }

    /// Enabling retries the spawn, disabling takes the placeholder out of
    /// the waitlist. Returns the spawn attempt's outcome when one was made.
    pub fn set_enabled<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        subscriptions: &mut Subscriptions,
        key: &AutoSpawnKey,
        enabled: bool,
    ) -> Result<Option<SpawnOutcome>, ClientError> {
        let auto_spawn = self
            .auto_spawns
            .get_mut(key)
            .ok_or(ClientError::UnknownAutoSpawn { key: *key })?;
        if auto_spawn.is_enabled() == enabled {
            return Ok(None);
        }
        auto_spawn.set_enabled(enabled);
        if enabled {
            return self.try_spawn(world, subscriptions, key).map(Some);
        }
        self.waitlist.remove(key);
        Ok(None)
    }

    /// Handles the destruction of the entity an auto-spawn created.
    pub fn on_entity_destroyed<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        subscriptions: &mut Subscriptions,
        key: &AutoSpawnKey,
        entity: EntityKey,
        reason: DestroyReason,
    ) -> DestroyOutcome {
        let Some(auto_spawn) = self.auto_spawns.get_mut(key) else {
            return DestroyOutcome::Ignored;
        };
        subscriptions.unsubscribe(Topic::EntityDestroyed(entity), Subscriber::AutoSpawn(*key));
        if auto_spawn.observed_entity() == Some(entity) {
            auto_spawn.observe(None);
        }

        let destroy_with_server = world
            .entity_binding(auto_spawn.node())
            .map_or(true, |binding| binding.destroy_with_server);
        if destroy_with_server || !auto_spawn.is_enabled() {
            return DestroyOutcome::Ignored;
        }

        if reason == DestroyReason::Disconnect {
            let node = auto_spawn.node();
            let ownership = auto_spawn.requested_permissions();
            let Some(scene) = world.scene(node) else {
                return DestroyOutcome::Ignored;
            };
            self.waitlist
                .add(SpawnRequest::new(*key, node, scene, ownership));
            debug!("Requeued auto-spawn for {}", world.node_name(node));
            DestroyOutcome::Requeued
        } else {
            auto_spawn.set_enabled(false);
            self.waitlist.remove(key);
            debug!(
                "Disabled auto-spawn for {} after {:?} destroy",
                world.node_name(auto_spawn.node()),
                reason
            );
            DestroyOutcome::Disabled
        }
    }

    /// Spawns every queued placeholder in the room's scene. Returns the
    /// entities that were created.
    pub fn on_room_initialized<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        subscriptions: &mut Subscriptions,
        room: RoomKey,
    ) -> Vec<(AutoSpawnKey, EntityKey)> {
        let mut spawned = Vec::new();
        let Some(info) = world.room(room) else {
            return spawned;
        };
        if !info.allow_player_spawning {
            return spawned;
        }
        let Some(scene) = info.scene else {
            return spawned;
        };

        let Self {
            waitlist,
            auto_spawns,
            ..
        } = self;
        waitlist.drain_for_scene(scene, |waitlist, key| {
            let outcome =
                Self::spawn_in_room(waitlist, auto_spawns, world, subscriptions, key, room);
            if let SpawnOutcome::Spawned { entity, .. } = outcome {
                spawned.push((key, entity));
            }
        });
        spawned
    }

    /// Drops auto-spawns whose node no longer exists.
    pub fn prune_destroyed<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        subscriptions: &mut Subscriptions,
    ) -> usize {
        let stale: Vec<AutoSpawnKey> = self
            .auto_spawns
            .iter()
            .filter(|(_, auto_spawn)| !world.has_node(auto_spawn.node()))
            .map(|(key, _)| *key)
            .collect();
        for key in &stale {
            self.remove(subscriptions, key);
        }
        stale.len()
    }

    fn get_or_err(&self, key: &AutoSpawnKey) -> Result<&AutoSpawn, ClientError> {
        self.auto_spawns
            .get(key)
            .ok_or(ClientError::UnknownAutoSpawn { key: *key })
    }

    /// Queues the placeholder when it is active. Returns whether it is queued.
    fn enqueue<W: ClientWorld + ?Sized>(&mut self, world: &W, key: &AutoSpawnKey) -> bool {
        let Some(auto_spawn) = self.auto_spawns.get(key) else {
            return false;
        };
        if !auto_spawn.is_active(world) {
            return false;
        }
        let node = auto_spawn.node();
        let Some(scene) = world.scene(node) else {
            return false;
        };
        self.waitlist.add(SpawnRequest::new(
            *key,
            node,
            scene,
            auto_spawn.requested_permissions(),
        ));
        true
    }

    fn spawn_in_room<W: ClientWorld + ?Sized>(
        waitlist: &mut SpawnWaitlist,
        auto_spawns: &mut HashMap<AutoSpawnKey, AutoSpawn>,
        world: &mut W,
        subscriptions: &mut Subscriptions,
        key: AutoSpawnKey,
        room: RoomKey,
    ) -> SpawnOutcome {
        waitlist.remove(&key);
        let Some(auto_spawn) = auto_spawns.get_mut(&key) else {
            return SpawnOutcome::NotSpawnable;
        };
        let node = auto_spawn.node();
        let Some(binding) = world.entity_binding(node) else {
            return SpawnOutcome::NotSpawnable;
        };

        let mut params = ClientSpawnParams::new(node, binding.asset_id)
            .with_transform(world.world_transform(node), ScaleMode::Absolute);
        if let Err(error) = params.validate(Some(binding)) {
            debug!("Skipping auto-spawn: {}", error);
            return SpawnOutcome::NotSpawnable;
        }
        let Some(room_info) = world.room(room) else {
            return SpawnOutcome::Rejected;
        };
        if let Some(permissions) = auto_spawn.requested_permissions() {
            params = params.with_owner(room_info.local_player_id, permissions);
        }

        let Some(entity) = world.spawn_entity(room, params) else {
            debug!("Room {:?} rejected spawn of {}", room, world.node_name(node));
            return SpawnOutcome::Rejected;
        };
        auto_spawn.observe(Some(entity));
        subscriptions.subscribe(Topic::EntityDestroyed(entity), Subscriber::AutoSpawn(key));
        debug!(
            "Auto-spawned {} as {:?} in room {:?}",
            world.node_name(node),
            entity,
            room
        );
        SpawnOutcome::Spawned { room, entity }
    }
}
