use crate::{component_state::ComponentKind, error::RuleError};

/// What happens to a node or component depending on whether the local player
/// owns the entity it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OwnershipRule {
    #[default]
    Unchanged,
    /// Disabled while unowned, re-enabled when ownership is gained. Physics
    /// bodies are made kinematic instead.
    DisableWhenUnowned,
    /// Disabled while owned, re-enabled when ownership is lost.
    DisableWhenOwned,
    /// Destroyed while unowned. Never recreated.
    DestroyWhenUnowned,
    /// Destroyed while owned. Never recreated.
    DestroyWhenOwned,
}

/// The effect of a rule for one ownership state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleAction {
    None,
    Disable,
    Destroy,
}

impl OwnershipRule {
    pub fn action(&self, is_owner: bool) -> RuleAction {
        match self {
            OwnershipRule::Unchanged => RuleAction::None,
            OwnershipRule::DisableWhenUnowned if !is_owner => RuleAction::Disable,
            OwnershipRule::DisableWhenOwned if is_owner => RuleAction::Disable,
            OwnershipRule::DestroyWhenUnowned if !is_owner => RuleAction::Destroy,
            OwnershipRule::DestroyWhenOwned if is_owner => RuleAction::Destroy,
            _ => RuleAction::None,
        }
    }

    pub fn is_disable(&self) -> bool {
        matches!(
            self,
            OwnershipRule::DisableWhenUnowned | OwnershipRule::DisableWhenOwned
        )
    }

    /// Checks the rule can be honoured for a component of the given kind.
    pub fn allowed_for(&self, kind: ComponentKind) -> Result<(), RuleError> {
        if kind == ComponentKind::Transform {
            return Err(RuleError::NotConfigurable { kind });
        }
        if self.is_disable() && !kind.can_disable() {
            return Err(RuleError::CannotDisable { rule: *self, kind });
        }
        Ok(())
    }

    /// Rules offered for a component kind, in declaration order.
    pub fn options_for(kind: ComponentKind) -> Vec<OwnershipRule> {
        [
            OwnershipRule::Unchanged,
            OwnershipRule::DisableWhenUnowned,
            OwnershipRule::DisableWhenOwned,
            OwnershipRule::DestroyWhenUnowned,
            OwnershipRule::DestroyWhenOwned,
        ]
        .into_iter()
        .filter(|rule| rule.allowed_for(kind).is_ok())
        .collect()
    }
}
