use log::debug;

use reactor_shared::{
    is_local_owner, ComponentKey, ComponentKind, EntityKey, ManagerKey, NodeKey, OwnershipRule,
    PlayerId, RuleAction,
};

use crate::{
    error::ClientError,
    ownership::{
        disabled_objects::{DisabledObjects, DisabledTarget},
        registry::ComponentRegistry,
        rules::OwnershipRules,
    },
    subscriptions::{Subscriber, Subscriptions, Topic},
    warning::ConfigWarning,
    world::{find_entity_binding_node, is_locally_owned, local_player_id, ClientWorld},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagerState {
    /// Neither the scope nor any ancestor carries an entity binding.
    Unbound,
    /// Waiting for an entity to attach to `binding_node`.
    AwaitingAttach { binding_node: NodeKey },
    Attached {
        entity: EntityKey,
        binding_node: NodeKey,
        /// The scope node is the entity's root node.
        is_entity_root: bool,
    },
    /// The scope node was destroyed by its own rule.
    Destroyed,
}

/// Result of applying rules for one ownership state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulesOutcome {
    Applied { disabled: usize, destroyed: usize },
    /// The scope rule destroyed the scope node. No component rules ran.
    ScopeDestroyed,
}

/// Enables, disables or destroys the scope node and its components
/// depending on whether the local player owns the entity above them.
#[derive(Clone, Debug)]
pub struct OwnershipManager {
    key: ManagerKey,
    scope: NodeKey,
    rules: OwnershipRules,
    state: ManagerState,
    disabled: DisabledObjects,
    applications: usize,
}

impl OwnershipManager {
    pub fn new(key: ManagerKey, scope: NodeKey, rules: OwnershipRules) -> Self {
        Self {
            key,
            scope,
            rules,
            state: ManagerState::Unbound,
            disabled: DisabledObjects::new(),
            applications: 0,
        }
    }

    pub fn key(&self) -> ManagerKey {
        self.key
    }

    pub fn scope(&self) -> NodeKey {
        self.scope
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn rules(&self) -> &OwnershipRules {
        &self.rules
    }

    pub fn disabled_objects(&self) -> &DisabledObjects {
        &self.disabled
    }

    /// How many times rules have been applied so far.
    pub fn applications(&self) -> usize {
        self.applications
    }

    fn subscriber(&self) -> Subscriber {
        Subscriber::OwnershipManager(self.key)
    }

    /// Binds the manager to the nearest entity binding at or above the scope.
    /// Rules are applied right away if an entity is already attached.
    pub fn initialize<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &ComponentRegistry,
        subscriptions: &mut Subscriptions,
    ) -> Option<RulesOutcome> {
        let Some(binding_node) = find_entity_binding_node(world, self.scope) else {
            debug!(
                "No entity binding above {}, ownership rules stay inactive",
                world.node_name(self.scope)
            );
            self.state = ManagerState::Unbound;
            return None;
        };

        match world.entity_binding(binding_node).and_then(|binding| binding.entity) {
            Some(entity) => Some(self.attach(world, registry, subscriptions, binding_node, entity)),
            None => {
                subscriptions.subscribe(Topic::EntityAttaching(binding_node), self.subscriber());
                self.state = ManagerState::AwaitingAttach { binding_node };
                None
            }
        }
    }

    /// Called when an entity is about to attach to a binding node.
    pub fn on_entity_attaching<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &ComponentRegistry,
        subscriptions: &mut Subscriptions,
        node: NodeKey,
        entity: EntityKey,
    ) -> Option<RulesOutcome> {
        let ManagerState::AwaitingAttach { binding_node } = self.state else {
            return None;
        };
        if binding_node != node {
            return None;
        }
        subscriptions.unsubscribe(Topic::EntityAttaching(binding_node), self.subscriber());
        Some(self.attach(world, registry, subscriptions, binding_node, entity))
    }

    fn attach<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &ComponentRegistry,
        subscriptions: &mut Subscriptions,
        binding_node: NodeKey,
        entity: EntityKey,
    ) -> RulesOutcome {
        let is_entity_root = binding_node == self.scope;
        self.state = ManagerState::Attached {
            entity,
            binding_node,
            is_entity_root,
        };
        subscriptions.subscribe(Topic::OwnershipChanged(entity), self.subscriber());
        subscriptions.subscribe(Topic::EntityDestroyed(entity), self.subscriber());

        // Left over from a previous entity on the same binding.
        self.restore_disabled(world);

        let is_owner = is_locally_owned(world, entity);
        self.apply_rules(world, registry, is_owner)
    }

    /// Re-applies rules if the local player gained or lost ownership. A change
    /// between two remote owners does nothing.
    pub fn on_ownership_changed<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &ComponentRegistry,
        old_owner: PlayerId,
        new_owner: PlayerId,
    ) -> Option<RulesOutcome> {
        let ManagerState::Attached { entity, .. } = self.state else {
            return None;
        };
        let local_id = local_player_id(world, entity)?;
        let was_owner = is_local_owner(old_owner, local_id);
        let is_owner = is_local_owner(new_owner, local_id);
        if was_owner == is_owner {
            return None;
        }

        debug!(
            "Ownership of {:?} flipped for {} (owner: {})",
            entity,
            world.node_name(self.scope),
            is_owner
        );
        self.restore_disabled(world);
        Some(self.apply_rules(world, registry, is_owner))
    }

    /// Drops the entity's subscriptions and waits for the next entity to
    /// attach to the same binding node.
    pub fn on_entity_destroyed<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        subscriptions: &mut Subscriptions,
        entity: EntityKey,
    ) {
        let ManagerState::Attached {
            entity: attached,
            binding_node,
            ..
        } = self.state
        else {
            return;
        };
        if attached != entity {
            return;
        }
        subscriptions.unsubscribe(Topic::OwnershipChanged(entity), self.subscriber());
        subscriptions.unsubscribe(Topic::EntityDestroyed(entity), self.subscriber());

        if world.has_node(binding_node) && world.has_node(self.scope) {
            subscriptions.subscribe(Topic::EntityAttaching(binding_node), self.subscriber());
            self.state = ManagerState::AwaitingAttach { binding_node };
        } else {
            self.state = ManagerState::Destroyed;
        }
    }

    /// Applies the scope rule, then every component rule, for one ownership
    /// state.
    pub fn apply_rules<W: ClientWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &ComponentRegistry,
        is_owner: bool,
    ) -> RulesOutcome {
        let ManagerState::Attached {
            entity,
            is_entity_root,
            ..
        } = self.state
        else {
            return RulesOutcome::Applied {
                disabled: 0,
                destroyed: 0,
            };
        };
        self.applications += 1;
        self.rules.prune_destroyed(world);

        let mut disabled = 0;
        let mut destroyed = 0;

        if !is_entity_root {
            match self.rules.scope_rule().action(is_owner) {
                RuleAction::None => {}
                RuleAction::Disable => {
                    if world.is_active_self(self.scope) {
                        world.set_active(self.scope, false);
                        self.disabled.push(DisabledTarget::Node(self.scope));
                        disabled += 1;
                    }
                }
                RuleAction::Destroy => {
                    debug!("Destroying {} (owner: {})", world.node_name(self.scope), is_owner);
                    world.destroy_node(self.scope);
                    self.state = ManagerState::Destroyed;
                    return RulesOutcome::ScopeDestroyed;
                }
            }
        }

        for component in world.components(self.scope) {
            if !registry.is_configurable(world, component) {
                continue;
            }
            match self.rules.rule_for(&component).action(is_owner) {
                RuleAction::None => {}
                RuleAction::Disable => {
                    if set_enabled(world, entity, is_entity_root, component, false) {
                        self.disabled.push(DisabledTarget::Component(component));
                        disabled += 1;
                    }
                }
                RuleAction::Destroy => {
                    destroy_component(world, entity, component);
                    self.rules.remove_component_rule(&component);
                    destroyed += 1;
                }
            }
        }

        debug!(
            "Applied ownership rules to {} (owner: {}): {} disabled, {} destroyed",
            world.node_name(self.scope),
            is_owner,
            disabled,
            destroyed
        );
        RulesOutcome::Applied {
            disabled,
            destroyed,
        }
    }

    /// Re-enables everything disabled for the previous ownership state.
    /// Returns how many objects actually changed back.
    pub fn restore_disabled<W: ClientWorld + ?Sized>(&mut self, world: &mut W) -> usize {
        let attached = match self.state {
            ManagerState::Attached {
                entity,
                is_entity_root,
                ..
            } => Some((entity, is_entity_root)),
            _ => None,
        };

        let mut restored = 0;
        for target in self.disabled.take() {
            let changed = match target {
                DisabledTarget::Node(node) => {
                    if world.has_node(node) && !world.is_active_self(node) {
                        world.set_active(node, true);
                        true
                    } else {
                        false
                    }
                }
                DisabledTarget::Component(component) => match attached {
                    Some((entity, is_entity_root)) => {
                        set_enabled(world, entity, is_entity_root, component, true)
                    }
                    None => world
                        .component_state_mut(component)
                        .is_some_and(|state| state.try_set_enabled(true)),
                },
            };
            if changed {
                restored += 1;
            }
        }
        restored
    }

    /// Overrides the rule for one component on the scope node.
    pub fn set_component_rule<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        registry: &ComponentRegistry,
        component: ComponentKey,
        rule: OwnershipRule,
    ) -> Result<(), ClientError> {
        self.rules.prune_destroyed(world);
        let kind = self.check_component(world, registry, component)?;
        rule.allowed_for(kind)?;
        self.rules.set_component_rule(component, rule);
        Ok(())
    }

    pub fn remove_component_rule<W: ClientWorld + ?Sized>(
        &mut self,
        world: &W,
        component: &ComponentKey,
    ) -> Option<OwnershipRule> {
        self.rules.prune_destroyed(world);
        self.rules.remove_component_rule(component)
    }

    pub fn set_scope_rule(&mut self, rule: OwnershipRule) {
        self.rules.set_scope_rule(rule);
    }

    pub fn set_default_rule(&mut self, rule: OwnershipRule) {
        self.rules.set_default_rule(rule);
    }

    /// Rules the host UI should offer for a component on the scope node.
    pub fn rule_options<W: ClientWorld + ?Sized>(
        &self,
        world: &W,
        registry: &ComponentRegistry,
        component: ComponentKey,
    ) -> Result<Vec<OwnershipRule>, ClientError> {
        let kind = self.check_component(world, registry, component)?;
        Ok(OwnershipRule::options_for(kind))
    }

    pub fn configuration_warning<W: ClientWorld + ?Sized>(&self, world: &W) -> Option<ConfigWarning> {
        if find_entity_binding_node(world, self.scope).is_none() {
            Some(ConfigWarning::NoEntityInAncestry)
        } else {
            None
        }
    }

    fn check_component<W: ClientWorld + ?Sized>(
        &self,
        world: &W,
        registry: &ComponentRegistry,
        component: ComponentKey,
    ) -> Result<ComponentKind, ClientError> {
        let Some(state) = world.component_state(component) else {
            return Err(ClientError::ComponentNotOnScope {
                component,
                scope: self.scope,
            });
        };
        if !world.components(self.scope).contains(&component) {
            return Err(ClientError::ComponentNotOnScope {
                component,
                scope: self.scope,
            });
        }
        if let Some(type_name) = world.component_type_name(component) {
            if registry.is_hidden(type_name) {
                return Err(ClientError::ComponentHidden {
                    component,
                    type_name: type_name.to_string(),
                });
            }
        }
        Ok(state.kind())
    }
}

/// Enables or disables a component, returning false when nothing changed.
/// A 3D rigid body the runtime wraps on the entity root goes through the
/// wrapper.
fn set_enabled<W: ClientWorld + ?Sized>(
    world: &mut W,
    entity: EntityKey,
    is_entity_root: bool,
    component: ComponentKey,
    enable: bool,
) -> bool {
    let Some(kind) = world.component_state(component).map(|state| state.kind()) else {
        return false;
    };
    if is_entity_root && kind == ComponentKind::RigidBody {
        if let Some(wrapper) = world.rigid_body_wrapper(entity) {
            if wrapper.component == component {
                if wrapper.kinematic != enable {
                    return false;
                }
                world.set_wrapper_kinematic(entity, !enable);
                return true;
            }
        }
    }
    world
        .component_state_mut(component)
        .is_some_and(|state| state.try_set_enabled(enable))
}

/// Destroys a component and clears the runtime's cached reference to it.
fn destroy_component<W: ClientWorld + ?Sized>(world: &mut W, entity: EntityKey, component: ComponentKey) {
    match world.component_state(component).map(|state| state.kind()) {
        Some(kind) if kind.is_physics_body() => world.clear_rigid_body(entity),
        Some(ComponentKind::CharacterController) => world.clear_character_controller(entity),
        _ => {}
    }
    world.destroy_component(component);
}
