pub type PlayerId = u32;
pub type AssetId = u32;

/// Identifies the scene a node or room belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Whether a participant id refers to the local player.
pub fn is_local_owner(owner: PlayerId, local_player: PlayerId) -> bool {
    owner == local_player
}
