use thiserror::Error as ThisError;

use reactor_shared::{AutoSpawnKey, ComponentKey, EntityKey, ManagerKey, NodeKey, RuleError};

/// Errors returned by the client's public operations
#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
pub enum ClientError {
    /// No auto-spawn is registered under the key
    #[error("Auto-spawn {key:?} is not registered")]
    UnknownAutoSpawn { key: AutoSpawnKey },

    /// No ownership manager is registered under the key
    #[error("Ownership manager {key:?} is not registered")]
    UnknownOwnershipManager { key: ManagerKey },

    /// The host has no such node
    #[error("Node {node:?} does not exist")]
    NodeNotFound { node: NodeKey },

    /// Auto-spawning needs an entity binding on the node itself
    #[error("Node {node:?} has no entity binding")]
    MissingEntityBinding { node: NodeKey },

    /// The node is already bound to an entity another player spawned
    #[error("Node {node:?} is bound to entity {entity:?}, which was not spawned by the local player")]
    SpawnedByRemotePlayer { node: NodeKey, entity: EntityKey },

    /// The component does not exist, or lives on a different node
    #[error("Component {component:?} is not on scope node {scope:?}")]
    ComponentNotOnScope {
        component: ComponentKey,
        scope: NodeKey,
    },

    /// The component's type is hidden from ownership management
    #[error("Component {component:?} of type {type_name} is hidden from ownership management")]
    ComponentHidden {
        component: ComponentKey,
        type_name: String,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),
}
