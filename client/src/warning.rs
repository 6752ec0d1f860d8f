use thiserror::Error as ThisError;

/// Misconfigurations surfaced to the host UI. None of these stop the client;
/// the affected auto-spawn or manager simply never does anything.
#[derive(Debug, Clone, Copy, ThisError, PartialEq, Eq)]
pub enum ConfigWarning {
    #[error("AutoSpawn can only be used on nodes with an entity binding")]
    MissingEntityBinding,

    #[error("AutoSpawn can only be used on entity prefabs with an asset id")]
    MissingAssetId,

    #[error("AutoSpawn cannot be used on permanent scene entities")]
    PermanentEntity,

    #[error("OwnershipManager can only be used on a node with an entity binding or one of its descendants")]
    NoEntityInAncestry,
}
