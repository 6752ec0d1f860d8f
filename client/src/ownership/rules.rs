use std::collections::HashMap;

use log::trace;

use reactor_shared::{ComponentKey, OwnershipRule};

use crate::world::HostWorld;

/// The rules one ownership manager applies to its scope node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnershipRules {
    scope_rule: OwnershipRule,
    default_rule: OwnershipRule,
    component_rules: HashMap<ComponentKey, OwnershipRule>,
}

impl OwnershipRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule for the scope node itself. Ignored when the scope is the
    /// entity's root node.
    pub fn with_scope_rule(mut self, rule: OwnershipRule) -> Self {
        self.scope_rule = rule;
        self
    }

    /// Rule for components without an override.
    pub fn with_default_rule(mut self, rule: OwnershipRule) -> Self {
        self.default_rule = rule;
        self
    }

    pub fn with_component_rule(mut self, component: ComponentKey, rule: OwnershipRule) -> Self {
        self.component_rules.insert(component, rule);
        self
    }

    pub fn scope_rule(&self) -> OwnershipRule {
        self.scope_rule
    }

    pub fn set_scope_rule(&mut self, rule: OwnershipRule) {
        self.scope_rule = rule;
    }

    pub fn default_rule(&self) -> OwnershipRule {
        self.default_rule
    }

    pub fn set_default_rule(&mut self, rule: OwnershipRule) {
        self.default_rule = rule;
    }

    /// Override if present, default rule otherwise.
    pub fn rule_for(&self, component: &ComponentKey) -> OwnershipRule {
        self.component_rules
            .get(component)
            .copied()
            .unwrap_or(self.default_rule)
    }

    pub fn component_rule(&self, component: &ComponentKey) -> Option<OwnershipRule> {
        self.component_rules.get(component).copied()
    }

    pub fn set_component_rule(&mut self, component: ComponentKey, rule: OwnershipRule) {
        self.component_rules.insert(component, rule);
    }

    pub fn remove_component_rule(&mut self, component: &ComponentKey) -> Option<OwnershipRule> {
        self.component_rules.remove(component)
    }

    pub fn component_rules(&self) -> impl Iterator<Item = (&ComponentKey, &OwnershipRule)> {
        self.component_rules.iter()
    }

    /// Drops overrides for components that no longer exist.
    pub fn prune_destroyed<W: HostWorld + ?Sized>(&mut self, world: &W) -> usize {
        let before = self.component_rules.len();
        self.component_rules
            .retain(|component, _| world.has_component(*component));
        let pruned = before - self.component_rules.len();
        if pruned > 0 {
            trace!("pruned {} rules for destroyed components", pruned);
        }
        pruned
    }
}
