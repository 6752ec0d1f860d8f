use reactor_shared::{
    ClientSpawnParams, ComponentKey, EntityKey, NodeKey, OwnerPermissions, PlayerId, RoomKey,
    SceneId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomInfo {
    pub connected: bool,
    pub allow_player_spawning: bool,
    /// Scene the room's node lives in. Rooms without a node have none.
    pub scene: Option<SceneId>,
    pub local_player_id: PlayerId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityInfo {
    pub room: RoomKey,
    /// Root node the entity is attached to.
    pub node: NodeKey,
    pub owner_id: PlayerId,
    pub permissions: OwnerPermissions,
    pub spawned_by_local_player: bool,
}

/// The runtime's own handle on an entity's rigid body. Kinematic changes to
/// a wrapped body must go through the wrapper so replication sees them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RigidBodyWrapper {
    pub component: ComponentKey,
    pub kinematic: bool,
}

/// The replication core that owns rooms and networked entities.
pub trait EntityRuntime {
    fn rooms(&self) -> Vec<RoomKey>;
    fn room(&self, room: RoomKey) -> Option<RoomInfo>;
    fn entity(&self, entity: EntityKey) -> Option<EntityInfo>;

    /// Creates an entity for `params.node` in the room and binds it to the
    /// node. Returns `None` when the runtime rejects the request.
    fn spawn_entity(&mut self, room: RoomKey, params: ClientSpawnParams) -> Option<EntityKey>;

    fn rigid_body_wrapper(&self, entity: EntityKey) -> Option<RigidBodyWrapper>;
    fn set_wrapper_kinematic(&mut self, entity: EntityKey, kinematic: bool);
    /// Drops the cached rigid body references (3D and 2D).
    fn clear_rigid_body(&mut self, entity: EntityKey);
    fn clear_character_controller(&mut self, entity: EntityKey);
}
