use glam::{Affine3A, Vec3};
use crate::api::types::NodeId;
use crate::components::node::Node;

/// Scene graph using a flat Vec with parent links.
/// Designed for small node counts (tens to hundreds, not millions).
///
/// Nodes with `parent == None` hang off the implicit scene root. Removal is
/// idempotent: removing something that is not there returns `None`.
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node directly under the scene root.
    pub fn spawn(&mut self, mut node: Node) {
        node.parent = None;
        self.nodes.push(node);
    }

    /// Attach a node under `parent` (`None` = scene root).
    /// Hands the node back if the parent does not exist.
    pub fn attach(&mut self, mut node: Node, parent: Option<NodeId>) -> Result<(), Node> {
        if let Some(p) = parent {
            if !self.contains(p) {
                return Err(node);
            }
        }
        node.parent = parent;
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node and its whole subtree. Returns the node itself; its
    /// descendants are dropped.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.swap_remove(idx);
        let mut orphans: Vec<NodeId> = self.child_ids(Some(id));
        while let Some(orphan) = orphans.pop() {
            orphans.extend(self.child_ids(Some(orphan)));
            self.nodes.retain(|n| n.id != orphan);
        }
        Some(node)
    }

    /// Remove a node only if it is a direct child of `parent`.
    pub fn remove_child(&mut self, parent: Option<NodeId>, id: NodeId) -> Option<Node> {
        match self.get(id) {
            Some(node) if node.parent == parent => self.remove(id),
            _ => None,
        }
    }

    /// Remove the first direct child of `parent` carrying `name`.
    pub fn remove_named(&mut self, parent: Option<NodeId>, name: &str) -> Option<Node> {
        let id = self.find_child_by_name(parent, name)?.id;
        self.remove(id)
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate over all nodes mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Direct children of `parent` (`None` = scene root).
    pub fn children(&self, parent: Option<NodeId>) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.parent == parent)
    }

    fn child_ids(&self, parent: Option<NodeId>) -> Vec<NodeId> {
        self.children(parent).map(|n| n.id).collect()
    }

    /// Find a direct child of `parent` by name.
    pub fn find_child_by_name(&self, parent: Option<NodeId>, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.parent == parent && n.name == name)
    }

    /// Local-to-world transform, composed up the parent chain.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine3A> {
        let mut node = self.get(id)?;
        let mut transform = node.local_transform();
        // Depth is bounded by node count; attach() only links to existing nodes.
        for _ in 0..self.nodes.len() {
            let Some(parent_id) = node.parent else { break };
            node = self.get(parent_id)?;
            transform = node.local_transform() * transform;
        }
        Some(transform)
    }

    /// World-space position of a node's origin.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_transform(id).map(|t| Vec3::from(t.translation))
    }

    /// A node is shown only if it and every ancestor are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = self.get(id);
        for _ in 0..=self.nodes.len() {
            match current {
                Some(node) if !node.visible => return false,
                Some(node) => match node.parent {
                    Some(p) => current = self.get(p),
                    None => return true,
                },
                None => return false,
            }
        }
        false
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with_child(scene: &mut Scene) -> (NodeId, NodeId) {
        let group = NodeId(1);
        let child = NodeId(2);
        scene.spawn(Node::new(group).with_name("group").with_position(Vec3::new(100.0, 0.0, 0.0)));
        scene
            .attach(Node::new(child).with_name("child").with_position(Vec3::new(0.0, 0.0, 60.0)), Some(group))
            .unwrap();
        (group, child)
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(1)).with_position(Vec3::new(10.0, 20.0, 30.0)));
        let n = scene.get(NodeId(1)).unwrap();
        assert_eq!(n.position, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn attach_to_missing_parent_hands_node_back() {
        let mut scene = Scene::new();
        let rejected = scene.attach(Node::new(NodeId(5)), Some(NodeId(99)));
        assert_eq!(rejected.unwrap_err().id, NodeId(5));
        assert!(scene.is_empty());
    }

    #[test]
    fn world_position_composes_parent() {
        let mut scene = Scene::new();
        let (_, child) = group_with_child(&mut scene);
        assert_eq!(scene.world_position(child), Some(Vec3::new(100.0, 0.0, 60.0)));
    }

    #[test]
    fn remove_drops_subtree() {
        let mut scene = Scene::new();
        let (group, child) = group_with_child(&mut scene);
        assert!(scene.remove(group).is_some());
        assert!(!scene.contains(child));
        assert!(scene.is_empty());
    }

    #[test]
    fn remove_child_checks_container() {
        let mut scene = Scene::new();
        let (group, child) = group_with_child(&mut scene);
        assert!(scene.remove_child(None, child).is_none());
        assert!(scene.remove_child(Some(group), child).is_some());
        assert!(scene.remove_child(Some(group), child).is_none());
    }

    #[test]
    fn remove_named_is_idempotent() {
        let mut scene = Scene::new();
        let (group, _) = group_with_child(&mut scene);
        assert!(scene.remove_named(None, "child").is_none());
        assert!(scene.remove_named(Some(group), "child").is_some());
        assert!(scene.remove_named(Some(group), "child").is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn hidden_parent_hides_child() {
        let mut scene = Scene::new();
        let (group, child) = group_with_child(&mut scene);
        assert!(scene.is_visible(child));
        scene.get_mut(group).unwrap().visible = false;
        assert!(!scene.is_visible(child));
    }
}
