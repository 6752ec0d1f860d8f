use crate::{
    key::{EntityKey, NodeKey, RoomKey},
    permissions::OwnerPermissions,
    types::PlayerId,
};

/// Why the runtime destroyed an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DestroyReason {
    /// The client lost its connection to the entity's room.
    Disconnect,
    /// The server destroyed the entity.
    Server,
    /// The client requested the destroy.
    Client,
    /// The entity left the client's scope.
    OutOfScope,
}

/// Notifications delivered by the entity runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A room finished its first state sync.
    RoomInitialized(RoomKey),
    /// An entity is about to be attached to the node carrying its binding.
    EntityAttaching { node: NodeKey, entity: EntityKey },
    OwnershipChanged {
        entity: EntityKey,
        old_owner: PlayerId,
        new_owner: PlayerId,
        old_permissions: OwnerPermissions,
        new_permissions: OwnerPermissions,
    },
    EntityDestroyed {
        entity: EntityKey,
        reason: DestroyReason,
    },
}
