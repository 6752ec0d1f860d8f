use std::collections::HashMap;

use log::{debug, warn};

use reactor_shared::{
    AutoSpawnKey, ComponentKey, DestroyReason, EntityKey, KeyGenerator, ManagerKey, NodeKey,
    OwnershipRule, PlayerId, RoomKey, RuntimeEvent,
};

use crate::{
    config::{AutoSpawnConfig, ClientConfig},
    error::ClientError,
    events::ClientEvents,
    ownership::{ComponentRegistry, OwnershipManager, OwnershipRules, RulesOutcome},
    spawn::{AutoSpawn, AutoSpawnController, AutoSpawnState, DestroyOutcome, SpawnOutcome, SpawnWaitlist},
    subscriptions::{Subscriber, Subscriptions, Topic},
    warning::ConfigWarning,
    world::ClientWorld,
};

/// Client-side spawn authority and ownership rule engine. Feed it every
/// runtime notification through `receive_event`.
#[cfg_attr(feature = "bevy_support", derive(bevy_ecs::prelude::Resource))]
pub struct Client {
    client_config: ClientConfig,
    registry: ComponentRegistry,
    subscriptions: Subscriptions,
    // Spawning
    spawner: AutoSpawnController,
    // Ownership
    managers: HashMap<ManagerKey, OwnershipManager>,
    manager_keys: KeyGenerator<ManagerKey>,
    // Events
    incoming_events: ClientEvents,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    /// Create a new Client
    pub fn new(client_config: ClientConfig) -> Self {
        Self::with_waitlist(client_config, SpawnWaitlist::new())
    }

    /// Create a new Client draining an existing waitlist
    pub fn with_waitlist(client_config: ClientConfig, waitlist: SpawnWaitlist) -> Self {
        let registry = ComponentRegistry::new(client_config.hidden_component_types.iter().cloned());
        Self {
            client_config,
            registry,
            subscriptions: Subscriptions::new(),
            spawner: AutoSpawnController::new(waitlist),
            managers: HashMap::new(),
            manager_keys: KeyGenerator::new(),
            incoming_events: ClientEvents::new(),
        }
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn auto_spawns(&self) -> &AutoSpawnController {
        &self.spawner
    }

    /// Everything the client did since the last call.
    pub fn take_events(&mut self) -> ClientEvents {
        std::mem::take(&mut self.incoming_events)
    }

    // Auto-spawn

    /// Registers an auto-spawn for `node` with the default config and tries
    /// to spawn it right away.
    pub fn add_auto_spawn<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        node: NodeKey,
    ) -> Result<AutoSpawnKey, ClientError> {
        let config = self.client_config.auto_spawn.clone();
        self.add_auto_spawn_with(world, node, config)
    }

    pub fn add_auto_spawn_with<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        node: NodeKey,
        config: AutoSpawnConfig,
    ) -> Result<AutoSpawnKey, ClientError> {
        let key = self
            .spawner
            .register(world, &mut self.subscriptions, node, config)?;
        let outcome = self.spawner.try_spawn(world, &mut self.subscriptions, &key)?;
        self.record_spawn(key, outcome);
        Ok(key)
    }

    pub fn remove_auto_spawn(&mut self, key: &AutoSpawnKey) -> Result<AutoSpawn, ClientError> {
        self.spawner
            .remove(&mut self.subscriptions, key)
            .ok_or(ClientError::UnknownAutoSpawn { key: *key })
    }

    pub fn try_spawn<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        key: &AutoSpawnKey,
    ) -> Result<SpawnOutcome, ClientError> {
        let outcome = self.spawner.try_spawn(world, &mut self.subscriptions, key)?;
        self.record_spawn(*key, outcome);
        Ok(outcome)
    }

    pub fn try_spawn_in_room<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        key: &AutoSpawnKey,
        room: RoomKey,
    ) -> Result<SpawnOutcome, ClientError> {
        let outcome = self
            .spawner
            .try_spawn_in_room(world, &mut self.subscriptions, key, room)?;
        self.record_spawn(*key, outcome);
        Ok(outcome)
    }

    pub fn set_auto_spawn_enabled<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        key: &AutoSpawnKey,
        enabled: bool,
    ) -> Result<Option<SpawnOutcome>, ClientError> {
        let outcome = self
            .spawner
            .set_enabled(world, &mut self.subscriptions, key, enabled)?;
        if let Some(outcome) = outcome {
            self.record_spawn(*key, outcome);
        }
        Ok(outcome)
    }

    pub fn auto_spawn_state<W: ClientWorld + ?Sized>(
        &self,
        world: &W,
        key: &AutoSpawnKey,
    ) -> Result<AutoSpawnState, ClientError> {
        self.spawner
            .state(world, key)
            .ok_or(ClientError::UnknownAutoSpawn { key: *key })
    }

    pub fn auto_spawn_warning<W: ClientWorld + ?Sized>(
        &self,
        world: &W,
        key: &AutoSpawnKey,
    ) -> Result<Option<ConfigWarning>, ClientError> {
        let auto_spawn = self
            .spawner
            .get(key)
            .ok_or(ClientError::UnknownAutoSpawn { key: *key })?;
        Ok(auto_spawn.configuration_warning(world))
    }

    // Ownership

    /// Registers an ownership manager on `scope` and initializes it. Rules are
    /// applied immediately if the entity is already attached.
    pub fn add_ownership_manager<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        scope: NodeKey,
        rules: OwnershipRules,
    ) -> Result<ManagerKey, ClientError> {
        if !world.has_node(scope) {
            return Err(ClientError::NodeNotFound { node: scope });
        }
        let key = self.manager_keys.generate();
        let mut manager = OwnershipManager::new(key, scope, rules);
        if let Some(warning) = manager.configuration_warning(world) {
            warn!("{}: {}", world.node_name(scope), warning);
        }
        let outcome = manager.initialize(world, &self.registry, &mut self.subscriptions);
        self.managers.insert(key, manager);
        if let Some(outcome) = outcome {
            self.record_rules(world, key, outcome);
        }
        Ok(key)
    }

    pub fn remove_ownership_manager(&mut self, key: &ManagerKey) -> Result<OwnershipManager, ClientError> {
        let manager = self
            .managers
            .remove(key)
            .ok_or(ClientError::UnknownOwnershipManager { key: *key })?;
        self.subscriptions
            .unsubscribe_all(Subscriber::OwnershipManager(*key));
        self.manager_keys.recycle_key(key);
        Ok(manager)
    }

    pub fn ownership_manager(&self, key: &ManagerKey) -> Option<&OwnershipManager> {
        self.managers.get(key)
    }

    pub fn ownership_managers(&self) -> impl Iterator<Item = (&ManagerKey, &OwnershipManager)> {
        self.managers.iter()
    }

    pub fn set_component_rule<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        key: &ManagerKey,
        component: ComponentKey,
        rule: OwnershipRule,
    ) -> Result<(), ClientError> {
        let manager = self
            .managers
            .get_mut(key)
            .ok_or(ClientError::UnknownOwnershipManager { key: *key })?;
        manager.set_component_rule(world, &self.registry, component, rule)
    }

    pub fn set_scope_rule(&mut self, key: &ManagerKey, rule: OwnershipRule) -> Result<(), ClientError> {
        self.manager_mut(key)?.set_scope_rule(rule);
        Ok(())
    }

    pub fn set_default_rule(&mut self, key: &ManagerKey, rule: OwnershipRule) -> Result<(), ClientError> {
        self.manager_mut(key)?.set_default_rule(rule);
        Ok(())
    }

    // Runtime events

    pub fn receive_events<W, I>(&mut self, world: &mut W, events: I)
    where
        W: ClientWorld + ?Sized,
        I: IntoIterator<Item = RuntimeEvent>,
    {
        for event in events {
            self.receive_event(world, event);
        }
    }

    pub fn receive_event<W: ClientWorld + ?Sized>(&mut self, world: &mut W, event: RuntimeEvent) {
        match event {
            RuntimeEvent::RoomInitialized(room) => self.on_room_initialized(world, room),
            RuntimeEvent::EntityAttaching { node, entity } => {
                self.on_entity_attaching(world, node, entity)
            }
            RuntimeEvent::OwnershipChanged {
                entity,
                old_owner,
                new_owner,
                ..
            } => self.on_ownership_changed(world, entity, old_owner, new_owner),
            RuntimeEvent::EntityDestroyed { entity, reason } => {
                self.on_entity_destroyed(world, entity, reason)
            }
        }
    }

    /// Drops auto-spawns and managers whose node no longer exists, along with
    /// their subscriptions. Returns how many were removed.
    pub fn prune_destroyed<W: ClientWorld + ?Sized>(&mut self, world: &W) -> usize {
        let mut pruned = self
            .spawner
            .prune_destroyed(world, &mut self.subscriptions);

        let stale: Vec<ManagerKey> = self
            .managers
            .iter()
            .filter(|(_, manager)| !world.has_node(manager.scope()))
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            if self.remove_ownership_manager(&key).is_ok() {
                pruned += 1;
            }
        }
        if pruned > 0 {
            debug!("Pruned {} listeners on destroyed nodes", pruned);
        }
        pruned
    }

    fn on_room_initialized<W: ClientWorld + ?Sized>(&mut self, world: &mut W, room: RoomKey) {
        let spawned = self
            .spawner
            .on_room_initialized(world, &mut self.subscriptions, room);
        for (key, entity) in spawned {
            self.incoming_events.push_spawn(key, room, entity);
        }
    }

    fn on_entity_attaching<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        node: NodeKey,
        entity: EntityKey,
    ) {
        for subscriber in self.subscriptions.subscribers(&Topic::EntityAttaching(node)) {
            let Subscriber::OwnershipManager(key) = subscriber else {
                continue;
            };
            let Some(manager) = self.managers.get_mut(&key) else {
                continue;
            };
            let outcome = manager.on_entity_attaching(
                world,
                &self.registry,
                &mut self.subscriptions,
                node,
                entity,
            );
            if let Some(outcome) = outcome {
                self.record_rules(world, key, outcome);
            }
        }
    }

    fn on_ownership_changed<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        entity: EntityKey,
        old_owner: PlayerId,
        new_owner: PlayerId,
    ) {
        for subscriber in self.subscriptions.subscribers(&Topic::OwnershipChanged(entity)) {
            let Subscriber::OwnershipManager(key) = subscriber else {
                continue;
            };
            let Some(manager) = self.managers.get_mut(&key) else {
                continue;
            };
            let outcome = manager.on_ownership_changed(world, &self.registry, old_owner, new_owner);
            if let Some(outcome) = outcome {
                self.record_rules(world, key, outcome);
            }
        }
    }

    fn on_entity_destroyed<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        entity: EntityKey,
        reason: DestroyReason,
    ) {
        for subscriber in self.subscriptions.subscribers(&Topic::EntityDestroyed(entity)) {
            match subscriber {
                Subscriber::AutoSpawn(key) => {
                    let outcome = self.spawner.on_entity_destroyed(
                        world,
                        &mut self.subscriptions,
                        &key,
                        entity,
                        reason,
                    );
                    match outcome {
                        DestroyOutcome::Ignored => {}
                        DestroyOutcome::Requeued => self.incoming_events.push_requeue(key),
                        DestroyOutcome::Disabled => {
                            self.incoming_events.push_auto_spawn_disable(key, reason)
                        }
                    }
                }
                Subscriber::OwnershipManager(key) => {
                    if let Some(manager) = self.managers.get_mut(&key) {
                        manager.on_entity_destroyed(world, &mut self.subscriptions, entity);
                    }
                }
            }
        }
        self.prune_destroyed(world);
    }

    fn record_spawn(&mut self, key: AutoSpawnKey, outcome: SpawnOutcome) {
        if let SpawnOutcome::Spawned { room, entity } = outcome {
            self.incoming_events.push_spawn(key, room, entity);
        }
    }

    fn record_rules<W: ClientWorld + ?Sized>(&mut self, world: &W, key: ManagerKey, outcome: RulesOutcome) {
        self.incoming_events.push_rules_applied(key, outcome);
        if outcome == RulesOutcome::ScopeDestroyed {
            // Listeners on the scope and its descendants went down with it.
            self.prune_destroyed(world);
        }
    }

    fn manager_mut(&mut self, key: &ManagerKey) -> Result<&mut OwnershipManager, ClientError> {
        self.managers
            .get_mut(key)
            .ok_or(ClientError::UnknownOwnershipManager { key: *key })
    }
}
