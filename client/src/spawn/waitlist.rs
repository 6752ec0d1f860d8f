use std::collections::{HashMap, HashSet};

use log::trace;

use reactor_shared::{AutoSpawnKey, NodeKey, OwnerPermissions, SceneId};

/// One placeholder waiting for a room it can be spawned into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    pub placeholder: AutoSpawnKey,
    pub node: NodeKey,
    pub scene: SceneId,
    /// Owner permissions to request when spawning owned. The owner id itself
    /// is the local player id of whichever room ends up taking the spawn.
    pub ownership: Option<OwnerPermissions>,
    index: usize,
}

impl SpawnRequest {
    pub fn new(
        placeholder: AutoSpawnKey,
        node: NodeKey,
        scene: SceneId,
        ownership: Option<OwnerPermissions>,
    ) -> Self {
        Self {
            placeholder,
            node,
            scene,
            ownership,
            index: 0,
        }
    }

    /// Position in the waitlist, only meaningful while queued.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Unordered list of pending spawn requests with O(1) removal.
#[derive(Default)]
pub struct SpawnWaitlist {
    requests: Vec<SpawnRequest>,
    positions: HashMap<AutoSpawnKey, usize>,
}

impl SpawnWaitlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the request. Returns false if its placeholder is already queued.
    pub fn add(&mut self, mut request: SpawnRequest) -> bool {
        if self.positions.contains_key(&request.placeholder) {
            return false;
        }
        let index = self.requests.len();
        request.index = index;
        self.positions.insert(request.placeholder, index);
        self.requests.push(request);
        true
    }

    /// Swap-removes the placeholder's request, fixing up the index of the
    /// request moved into its slot.
    pub fn remove(&mut self, placeholder: &AutoSpawnKey) -> Option<SpawnRequest> {
        let index = self.positions.remove(placeholder)?;
        let removed = self.requests.swap_remove(index);
        if let Some(moved) = self.requests.get_mut(index) {
            moved.index = index;
            self.positions.insert(moved.placeholder, index);
        }
        Some(removed)
    }

    pub fn contains(&self, placeholder: &AutoSpawnKey) -> bool {
        self.positions.contains_key(placeholder)
    }

    pub fn get(&self, placeholder: &AutoSpawnKey) -> Option<&SpawnRequest> {
        let index = self.positions.get(placeholder)?;
        self.requests.get(*index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnRequest> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Calls `spawn` for every request bound for `scene`, last to first.
    /// `spawn` may remove any number of entries. A removed entry is never
    /// visited afterwards and no entry is visited twice.
    pub fn drain_for_scene<F>(&mut self, scene: SceneId, mut spawn: F)
    where
        F: FnMut(&mut Self, AutoSpawnKey),
    {
        trace!(
            "draining {} spawn requests for {:?}",
            self.requests.len(),
            scene
        );
        let mut visited = HashSet::new();
        let mut index = self.requests.len();
        while index > 0 {
            index -= 1;
            let Some(request) = self.requests.get(index) else {
                continue;
            };
            // Swap-removes can move an already visited entry down.
            if request.scene != scene || !visited.insert(request.placeholder) {
                continue;
            }
            let placeholder = request.placeholder;
            spawn(self, placeholder);
        }
    }
}
