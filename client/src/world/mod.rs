mod entity_runtime;
mod host_world;

pub use entity_runtime::{EntityInfo, EntityRuntime, RigidBodyWrapper, RoomInfo};
pub use host_world::HostWorld;

use reactor_shared::{is_local_owner, EntityKey, NodeKey, PlayerId, RoomKey};

/// Everything the client needs from its environment.
pub trait ClientWorld: HostWorld + EntityRuntime {}

impl<W: HostWorld + EntityRuntime> ClientWorld for W {}

/// Nearest node carrying an entity binding, starting at `node` itself.
pub fn find_entity_binding_node<W: HostWorld + ?Sized>(world: &W, node: NodeKey) -> Option<NodeKey> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if world.entity_binding(candidate).is_some() {
            return Some(candidate);
        }
        current = world.parent(candidate);
    }
    None
}

/// Nearest room binding strictly above `node`.
pub fn find_ancestor_room<W: HostWorld + ?Sized>(world: &W, node: NodeKey) -> Option<RoomKey> {
    let mut current = world.parent(node);
    while let Some(candidate) = current {
        if let Some(room) = world.room_binding(candidate) {
            return Some(room);
        }
        current = world.parent(candidate);
    }
    None
}

/// Local participant id of the room the entity lives in.
pub fn local_player_id<W: EntityRuntime + ?Sized>(world: &W, entity: EntityKey) -> Option<PlayerId> {
    let info = world.entity(entity)?;
    Some(world.room(info.room)?.local_player_id)
}

pub fn is_locally_owned<W: EntityRuntime + ?Sized>(world: &W, entity: EntityKey) -> bool {
    let Some(info) = world.entity(entity) else {
        return false;
    };
    local_player_id(world, entity).is_some_and(|local_id| is_local_owner(info.owner_id, local_id))
}
