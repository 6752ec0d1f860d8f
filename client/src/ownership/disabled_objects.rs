use reactor_shared::{ComponentKey, NodeKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisabledTarget {
    Node(NodeKey),
    Component(ComponentKey),
}

/// Everything one manager switched off for the current ownership state.
/// Entries are only recorded for real state changes, so restoring each one
/// once undoes exactly what was done.
#[derive(Clone, Debug, Default)]
pub struct DisabledObjects {
    targets: Vec<DisabledTarget>,
}

impl DisabledObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: DisabledTarget) {
        self.targets.push(target);
    }

    pub fn contains(&self, target: &DisabledTarget) -> bool {
        self.targets.contains(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisabledTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<DisabledTarget> {
        std::mem::take(&mut self.targets)
    }
}
