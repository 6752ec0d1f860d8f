mod disabled_objects;
mod manager;
mod registry;
mod rules;

pub use disabled_objects::{DisabledObjects, DisabledTarget};
pub use manager::{ManagerState, OwnershipManager, RulesOutcome};
pub use registry::{ComponentRegistry, AUTO_SPAWN_TYPE_NAME, OWNERSHIP_MANAGER_TYPE_NAME};
pub use rules::OwnershipRules;
