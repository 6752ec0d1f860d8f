use std::{collections::VecDeque, hash::Hash, marker::PhantomData};

/// A handle that can be packed into a `u64`, used for every key handed across the
/// host boundary.
pub trait Key: Copy + Eq + Hash + std::fmt::Debug {
    fn to_u64(&self) -> u64;
    fn from_u64(value: u64) -> Self;
}

macro_rules! define_key {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl Key for $name {
            fn to_u64(&self) -> u64 {
                self.0
            }

            fn from_u64(value: u64) -> Self {
                $name(value)
            }
        }
    };
}

define_key!(
    /// A node in the host's object hierarchy.
    NodeKey
);
define_key!(
    /// A component attached to a host node.
    ComponentKey
);
define_key!(
    /// A room the client is (or was) connected to.
    RoomKey
);
define_key!(
    /// A networked entity created by the runtime.
    EntityKey
);
define_key!(
    /// An auto-spawn registered with the client.
    AutoSpawnKey
);
define_key!(
    /// An ownership manager registered with the client.
    ManagerKey
);

/// Hands out unique keys, reusing recycled ones first.
pub struct KeyGenerator<K: Key> {
    next: u64,
    recycled: VecDeque<u64>,
    phantom_k: PhantomData<K>,
}

impl<K: Key> Default for KeyGenerator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> KeyGenerator<K> {
    pub fn new() -> Self {
        Self {
            next: 0,
            recycled: VecDeque::new(),
            phantom_k: PhantomData,
        }
    }

    pub fn generate(&mut self) -> K {
        if let Some(value) = self.recycled.pop_front() {
            return K::from_u64(value);
        }

        let value = self.next;
        self.next = self.next.wrapping_add(1);
        K::from_u64(value)
    }

    pub fn recycle_key(&mut self, key: &K) {
        self.recycled.push_back(key.to_u64());
    }
}
