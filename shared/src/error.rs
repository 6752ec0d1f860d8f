use thiserror::Error as ThisError;

use crate::{component_state::ComponentKind, key::NodeKey, ownership_rule::OwnershipRule};

/// Reasons a spawn request is rejected before it reaches the server.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum SpawnParamsError {
    /// The node has no entity binding to spawn from
    #[error("Invalid spawn parameters: node {node:?} has no entity binding")]
    MissingEntityBinding { node: NodeKey },

    /// Only prefabs registered as assets carry a non-zero asset id
    #[error("Invalid spawn parameters: node {node:?} has no asset id")]
    MissingAssetId { node: NodeKey },

    /// The node is still linked to an entity that has not been destroyed
    #[error("Invalid spawn parameters: node {node:?} already belongs to a live entity")]
    AlreadyBound { node: NodeKey },

    /// Permanent entities are written to the scene and never client-spawned
    #[error("Invalid spawn parameters: node {node:?} is a permanent entity")]
    Permanent { node: NodeKey },
}

/// Errors configuring an ownership rule.
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum RuleError {
    /// The component kind never takes a rule (e.g. the transform)
    #[error("Components of kind {kind:?} cannot have ownership rules")]
    NotConfigurable { kind: ComponentKind },

    /// A disable rule was set on a kind that has no enabled state
    #[error("Rule {rule:?} requires disabling, which {kind:?} components do not support")]
    CannotDisable {
        rule: OwnershipRule,
        kind: ComponentKind,
    },
}
