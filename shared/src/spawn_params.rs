use glam::{Quat, Vec2, Vec3};

use crate::{
    error::SpawnParamsError,
    key::{EntityKey, NodeKey},
    permissions::OwnerPermissions,
    types::{AssetId, PlayerId},
};

/// The link between a host node and the networked entity it represents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityBinding {
    pub asset_id: AssetId,
    /// Permanent entities are part of the scene and never spawned by clients.
    pub permanent: bool,
    /// When set, the node is destroyed together with its entity.
    pub destroy_with_server: bool,
    pub entity: Option<EntityKey>,
}

impl EntityBinding {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            permanent: false,
            destroy_with_server: false,
            entity: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.entity.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for SpawnTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl SpawnTransform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Builds a transform on the XY plane. `angle` is in radians around Z.
    pub fn from_2d(position: Vec2, angle: f32, scale: Vec2) -> Self {
        Self {
            position: position.extend(0.0),
            rotation: Quat::from_rotation_z(angle),
            scale: scale.extend(1.0),
        }
    }

    pub fn position_2d(&self) -> Vec2 {
        self.position.truncate()
    }

    pub fn angle_2d(&self) -> f32 {
        let (axis, angle) = self.rotation.to_axis_angle();
        if axis.z < 0.0 {
            -angle
        } else {
            angle
        }
    }
}

/// How the spawn scale is interpreted by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Scale is multiplied with the prefab's own scale.
    #[default]
    Relative,
    /// Scale is applied as-is.
    Absolute,
}

/// Everything the runtime needs to create an entity for a placeholder node.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientSpawnParams {
    pub node: NodeKey,
    pub asset_id: AssetId,
    pub transform: SpawnTransform,
    pub scale_mode: ScaleMode,
    pub owner_id: Option<PlayerId>,
    pub permissions: Option<OwnerPermissions>,
}

impl ClientSpawnParams {
    pub fn new(node: NodeKey, asset_id: AssetId) -> Self {
        Self {
            node,
            asset_id,
            transform: SpawnTransform::default(),
            scale_mode: ScaleMode::default(),
            owner_id: None,
            permissions: None,
        }
    }

    pub fn with_transform(mut self, transform: SpawnTransform, scale_mode: ScaleMode) -> Self {
        self.transform = transform;
        self.scale_mode = scale_mode;
        self
    }

    pub fn with_owner(mut self, owner_id: PlayerId, permissions: OwnerPermissions) -> Self {
        self.owner_id = Some(owner_id);
        self.permissions = Some(permissions);
        self
    }

    /// Checks the parameters against the node's current entity binding.
    pub fn validate(&self, binding: Option<&EntityBinding>) -> Result<(), SpawnParamsError> {
        let Some(binding) = binding else {
            return Err(SpawnParamsError::MissingEntityBinding { node: self.node });
        };
        if self.asset_id == 0 || binding.asset_id == 0 {
            return Err(SpawnParamsError::MissingAssetId { node: self.node });
        }
        if binding.is_attached() {
            return Err(SpawnParamsError::AlreadyBound { node: self.node });
        }
        if binding.permanent {
            return Err(SpawnParamsError::Permanent { node: self.node });
        }
        Ok(())
    }
}
