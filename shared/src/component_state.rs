/// The kind of a host component, as far as ownership rules are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Behaviour,
    EntityScript,
    Collider,
    Renderer,
    CharacterController,
    RigidBody,
    RigidBody2D,
    Other,
}

impl ComponentKind {
    /// Kinds that can be switched off without being destroyed. Physics bodies
    /// count: they are made kinematic instead.
    pub fn can_disable(&self) -> bool {
        !matches!(self, ComponentKind::Transform | ComponentKind::Other)
    }

    pub fn is_physics_body(&self) -> bool {
        matches!(self, ComponentKind::RigidBody | ComponentKind::RigidBody2D)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType2D {
    Dynamic,
    Kinematic,
    Static,
}

/// Toggleable state of a host component, one variant per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentState {
    Transform,
    Behaviour {
        enabled: bool,
    },
    /// A script bound to a networked entity. While detached only the
    /// `enable_on_attach` flag is tracked; the script picks it up on attach.
    EntityScript {
        enable_on_attach: bool,
        attached: bool,
        enabled: bool,
    },
    Collider {
        enabled: bool,
    },
    Renderer {
        enabled: bool,
    },
    CharacterController {
        enabled: bool,
    },
    RigidBody {
        kinematic: bool,
    },
    RigidBody2D {
        body_type: BodyType2D,
    },
    Other,
}

impl ComponentState {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentState::Transform => ComponentKind::Transform,
            ComponentState::Behaviour { .. } => ComponentKind::Behaviour,
            ComponentState::EntityScript { .. } => ComponentKind::EntityScript,
            ComponentState::Collider { .. } => ComponentKind::Collider,
            ComponentState::Renderer { .. } => ComponentKind::Renderer,
            ComponentState::CharacterController { .. } => ComponentKind::CharacterController,
            ComponentState::RigidBody { .. } => ComponentKind::RigidBody,
            ComponentState::RigidBody2D { .. } => ComponentKind::RigidBody2D,
            ComponentState::Other => ComponentKind::Other,
        }
    }

    /// Effective enabled state. Rigid bodies are "enabled" when simulated.
    pub fn is_enabled(&self) -> bool {
        match self {
            ComponentState::Transform | ComponentState::Other => true,
            ComponentState::Behaviour { enabled }
            | ComponentState::Collider { enabled }
            | ComponentState::Renderer { enabled }
            | ComponentState::CharacterController { enabled } => *enabled,
            ComponentState::EntityScript {
                enable_on_attach, ..
            } => *enable_on_attach,
            ComponentState::RigidBody { kinematic } => !*kinematic,
            ComponentState::RigidBody2D { body_type } => *body_type == BodyType2D::Dynamic,
        }
    }

    /// Enables or disables the component. Returns false when nothing changed:
    /// already in the requested state, a static 2D body, or a kind with no
    /// enabled state at all.
    pub fn try_set_enabled(&mut self, enable: bool) -> bool {
        match self {
            ComponentState::Transform | ComponentState::Other => false,
            ComponentState::Behaviour { enabled }
            | ComponentState::Collider { enabled }
            | ComponentState::Renderer { enabled }
            | ComponentState::CharacterController { enabled } => {
                if *enabled == enable {
                    return false;
                }
                *enabled = enable;
                true
            }
            ComponentState::EntityScript {
                enable_on_attach,
                attached,
                enabled,
            } => {
                if *enable_on_attach == enable {
                    return false;
                }
                *enable_on_attach = enable;
                if *attached {
                    *enabled = enable;
                }
                true
            }
            ComponentState::RigidBody { kinematic } => {
                if *kinematic != enable {
                    return false;
                }
                *kinematic = !enable;
                true
            }
            ComponentState::RigidBody2D { body_type } => {
                let (from, to) = if enable {
                    (BodyType2D::Kinematic, BodyType2D::Dynamic)
                } else {
                    (BodyType2D::Dynamic, BodyType2D::Kinematic)
                };
                if *body_type != from {
                    return false;
                }
                *body_type = to;
                true
            }
        }
    }
}
