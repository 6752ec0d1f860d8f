use std::vec::IntoIter;

use reactor_shared::{AutoSpawnKey, DestroyReason, EntityKey, ManagerKey, RoomKey};

use crate::ownership::RulesOutcome;

/// What the client did in response to runtime events since the last read.
pub struct ClientEvents {
    spawns: Vec<(AutoSpawnKey, RoomKey, EntityKey)>,
    requeues: Vec<AutoSpawnKey>,
    auto_spawn_disables: Vec<(AutoSpawnKey, DestroyReason)>,
    rule_applications: Vec<(ManagerKey, RulesOutcome)>,
    empty: bool,
}

impl Default for ClientEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEvents {
    pub(crate) fn new() -> Self {
        Self {
            spawns: Vec::new(),
            requeues: Vec::new(),
            auto_spawn_disables: Vec::new(),
            rule_applications: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ClientEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: ClientEvent>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_spawn(&mut self, auto_spawn: AutoSpawnKey, room: RoomKey, entity: EntityKey) {
        self.spawns.push((auto_spawn, room, entity));
        self.empty = false;
    }

    pub(crate) fn push_requeue(&mut self, auto_spawn: AutoSpawnKey) {
        self.requeues.push(auto_spawn);
        self.empty = false;
    }

    pub(crate) fn push_auto_spawn_disable(&mut self, auto_spawn: AutoSpawnKey, reason: DestroyReason) {
        self.auto_spawn_disables.push((auto_spawn, reason));
        self.empty = false;
    }

    pub(crate) fn push_rules_applied(&mut self, manager: ManagerKey, outcome: RulesOutcome) {
        self.rule_applications.push((manager, outcome));
        self.empty = false;
    }
}

// Event Trait
pub trait ClientEvent {
    type Iter;

    fn iter(events: &mut ClientEvents) -> Self::Iter;

    fn has(events: &ClientEvents) -> bool;
}

// Auto Spawned Event
pub struct AutoSpawnedEvent;
impl ClientEvent for AutoSpawnedEvent {
    type Iter = IntoIter<(AutoSpawnKey, RoomKey, EntityKey)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.spawns);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.spawns.is_empty()
    }
}

// Requeued Event
pub struct RequeuedEvent;
impl ClientEvent for RequeuedEvent {
    type Iter = IntoIter<AutoSpawnKey>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.requeues);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.requeues.is_empty()
    }
}

// Auto Spawn Disabled Event
pub struct AutoSpawnDisabledEvent;
impl ClientEvent for AutoSpawnDisabledEvent {
    type Iter = IntoIter<(AutoSpawnKey, DestroyReason)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.auto_spawn_disables);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.auto_spawn_disables.is_empty()
    }
}

// Rules Applied Event
pub struct RulesAppliedEvent;
impl ClientEvent for RulesAppliedEvent {
    type Iter = IntoIter<(ManagerKey, RulesOutcome)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.rule_applications);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.rule_applications.is_empty()
    }
}
