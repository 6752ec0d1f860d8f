use reactor_shared::{
    ComponentKey, ComponentState, EntityBinding, NodeKey, RoomKey, SceneId, SpawnTransform,
};

/// The host engine's object hierarchy, as seen by the client core.
///
/// Implementations own every node and component. Destroying a node destroys
/// its descendants and components with it.
pub trait HostWorld {
    // Nodes

    fn has_node(&self, node: NodeKey) -> bool;
    fn parent(&self, node: NodeKey) -> Option<NodeKey>;
    fn scene(&self, node: NodeKey) -> Option<SceneId>;
    /// Display name used in log output.
    fn node_name(&self, node: NodeKey) -> String;
    fn is_active_self(&self, node: NodeKey) -> bool;
    /// Active and every ancestor active.
    fn is_active_in_hierarchy(&self, node: NodeKey) -> bool;
    fn set_active(&mut self, node: NodeKey, active: bool);
    fn destroy_node(&mut self, node: NodeKey);
    /// World-space transform with the absolute (lossy) scale.
    fn world_transform(&self, node: NodeKey) -> SpawnTransform;

    // Bindings

    /// The room bound directly to this node, if any.
    fn room_binding(&self, node: NodeKey) -> Option<RoomKey>;
    /// The entity binding carried directly by this node, if any.
    fn entity_binding(&self, node: NodeKey) -> Option<&EntityBinding>;

    // Components

    fn components(&self, node: NodeKey) -> Vec<ComponentKey>;
    fn has_component(&self, component: ComponentKey) -> bool;
    fn component_type_name(&self, component: ComponentKey) -> Option<&str>;
    fn component_state(&self, component: ComponentKey) -> Option<&ComponentState>;
    fn component_state_mut(&mut self, component: ComponentKey) -> Option<&mut ComponentState>;
    fn destroy_component(&mut self, component: ComponentKey);
}
