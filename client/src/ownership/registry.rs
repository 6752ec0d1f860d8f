use std::collections::HashSet;

use reactor_shared::{ComponentKey, ComponentKind};

use crate::world::HostWorld;

pub const AUTO_SPAWN_TYPE_NAME: &str = "AutoSpawn";
pub const OWNERSHIP_MANAGER_TYPE_NAME: &str = "OwnershipManager";

/// Component types ownership managers never configure or touch.
#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    hidden: HashSet<String>,
}

impl ComponentRegistry {
    pub fn new<I, S>(hidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hidden: hidden.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns false if the type was already hidden.
    pub fn hide(&mut self, type_name: &str) -> bool {
        self.hidden.insert(type_name.to_string())
    }

    pub fn show(&mut self, type_name: &str) -> bool {
        self.hidden.remove(type_name)
    }

    pub fn is_hidden(&self, type_name: &str) -> bool {
        self.hidden.contains(type_name)
    }

    /// A component can carry a rule unless it is the transform, is hidden,
    /// or no longer exists.
    pub fn is_configurable<W: HostWorld + ?Sized>(&self, world: &W, component: ComponentKey) -> bool {
        let Some(state) = world.component_state(component) else {
            return false;
        };
        if state.kind() == ComponentKind::Transform {
            return false;
        }
        !world
            .component_type_name(component)
            .is_some_and(|type_name| self.is_hidden(type_name))
    }
}
