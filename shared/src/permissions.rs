use std::ops::{BitAnd, BitOr, Not};

/// Flags describing what an entity's owner is allowed to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct OwnerPermissions(u8);

impl OwnerPermissions {
    pub const NONE: Self = Self(0);
    /// Owner drives the entity's position.
    pub const POSITION: Self = Self(1 << 0);
    /// Owner drives the entity's rotation.
    pub const ROTATION: Self = Self(1 << 1);
    /// Owner drives the entity's scale.
    pub const SCALE: Self = Self(1 << 2);
    /// Owner may write replicated properties.
    pub const PROPERTIES: Self = Self(1 << 3);
    pub const TRANSFORM: Self = Self(Self::POSITION.0 | Self::ROTATION.0 | Self::SCALE.0);
    pub const ALL: Self = Self(Self::TRANSFORM.0 | Self::PROPERTIES.0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for OwnerPermissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for OwnerPermissions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for OwnerPermissions {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}
