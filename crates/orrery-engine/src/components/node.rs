use glam::{Affine3A, Quat, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::{LineComponent, MeshComponent};

/// Fat scene node: a single struct with optional components.
/// A node without mesh or line is a group: it only carries a transform
/// for its children.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Name used for lookups by the host and by name-tracked registries.
    pub name: String,
    /// Parent node, or `None` when attached directly to the scene root.
    pub parent: Option<NodeId>,
    /// Hidden nodes (and their subtrees) are neither rendered nor picked.
    pub visible: bool,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    pub mesh: Option<MeshComponent>,
    pub line: Option<LineComponent>,
}

impl Node {
    /// Create a new group node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: String::new(),
            parent: None,
            visible: true,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mesh: None,
            line: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_line(mut self, line: LineComponent) -> Self {
        self.line = Some(line);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Transform from this node's local space into its parent's space.
    pub fn local_transform(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position)
    }

    pub fn is_group(&self) -> bool {
        self.mesh.is_none() && self.line.is_none()
    }
}
