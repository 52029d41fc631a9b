//! Arena scene graph
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. Geometry
//! (meshes and particle clouds) is stored once in the graph and shared by
//! handle, so the renderer can upload each resource a single time no matter
//! how many nodes draw it.

use crate::behaviour::Behaviour;
use crate::material::{MeshMaterial, PointsMaterial};
use crate::picking::PickTarget;
use cosmic_core::{ParticleCloud, Rgb, Transform3D, TriangleMesh, Vector3f};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloudHandle(pub usize);

/// Billboard text anchored at a node, drawn by the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Glyph height in world units
    pub font_size: f32,
    pub color: Rgb,
    pub outline: Option<Rgb>,
}

impl Label {
    pub fn new(text: impl Into<String>, font_size: f32, color: Rgb) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
            outline: None,
        }
    }

    pub fn outlined(mut self, outline: Rgb) -> Self {
        self.outline = Some(outline);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh { mesh: MeshHandle, material: MeshMaterial },
    Points { cloud: CloudHandle, material: PointsMaterial },
    Label(Label),
}

/// Position, XYZ Euler rotation and scale relative to the parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vector3f,
    pub rotation: Vector3f,
    pub scale: Vector3f,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vector3f::zeros(),
            rotation: Vector3f::zeros(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
        }
    }
}

impl LocalTransform {
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::from_trs(self.position, self.rotation, self.scale)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub transform: LocalTransform,
    pub visible: bool,
    pub kind: NodeKind,
    pub pickable: Option<PickTarget>,
    pub behaviours: Vec<Behaviour>,
}

impl Node {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: LocalTransform::default(),
            visible: true,
            kind,
            pickable: None,
            behaviours: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, mesh: MeshHandle, material: MeshMaterial) -> Self {
        Self::with_kind(name, NodeKind::Mesh { mesh, material })
    }

    pub fn points(name: impl Into<String>, cloud: CloudHandle, material: PointsMaterial) -> Self {
        Self::with_kind(name, NodeKind::Points { cloud, material })
    }

    pub fn label(name: impl Into<String>, label: Label) -> Self {
        Self::with_kind(name, NodeKind::Label(label))
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3f::new(x, y, z);
        self
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3f::new(x, y, z);
        self
    }

    pub fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviours.push(behaviour);
        self
    }

    pub fn pickable(mut self, target: PickTarget) -> Self {
        self.pickable = Some(target);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// A scene graph with a single root group
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    meshes: Vec<Arc<TriangleMesh>>,
    clouds: Vec<Arc<ParticleCloud>>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::group("root")],
            meshes: Vec::new(),
            clouds: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Store a mesh once and get a handle to share it between nodes
    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> MeshHandle {
        self.meshes.push(Arc::new(mesh));
        MeshHandle(self.meshes.len() - 1)
    }

    pub fn add_cloud(&mut self, cloud: ParticleCloud) -> CloudHandle {
        self.clouds.push(Arc::new(cloud));
        CloudHandle(self.clouds.len() - 1)
    }

    pub fn mesh(&self, handle: MeshHandle) -> &Arc<TriangleMesh> {
        &self.meshes[handle.0]
    }

    pub fn cloud(&self, handle: CloudHandle) -> &Arc<ParticleCloud> {
        &self.clouds[handle.0]
    }

    pub fn meshes(&self) -> &[Arc<TriangleMesh>] {
        &self.meshes
    }

    pub fn clouds(&self) -> &[Arc<ParticleCloud>] {
        &self.clouds
    }

    /// Attach `node` under `parent`
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// First node with the given name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.0].visible = visible;
    }

    /// Local-to-world transform of a node
    pub fn world_transform(&self, id: NodeId) -> Transform3D {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            chain.push(node_id);
            current = self.nodes[node_id.0].parent;
        }

        chain
            .iter()
            .rev()
            .fold(Transform3D::identity(), |acc, id| acc * self.nodes[id.0].transform.to_transform())
    }

    /// A node is drawn only if it and all of its ancestors are visible
    pub fn is_visible_in_world(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Depth-first list of visible nodes with their world transforms.
    /// Hidden subtrees are skipped entirely.
    pub fn walk_visible(&self) -> Vec<(NodeId, Transform3D)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), Transform3D::identity())];

        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.to_transform();
            out.push((id, world));
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }

        out
    }

    /// Run every node's behaviours for a frame of `dt` seconds.
    ///
    /// Hidden nodes keep animating so a scene resumes where it would have been.
    pub fn advance(&mut self, dt: f32, elapsed: f32, playing: bool) {
        for node in &mut self.nodes {
            let LocalTransform { rotation, scale, .. } = &mut node.transform;
            for behaviour in &node.behaviours {
                behaviour.apply(rotation, scale, dt, elapsed, playing);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviour::Behaviour;
    use approx::assert_relative_eq;
    use cosmic_core::Point3f;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_world_transform_composes_parents() {
        let mut graph = SceneGraph::new();
        let orbit = graph.add(graph.root(), Node::group("orbit").rotated(0.0, FRAC_PI_2, 0.0));
        let body = graph.add(orbit, Node::group("body").at(10.0, 0.0, 0.0));

        let world = graph.world_transform(body);
        assert_relative_eq!(world.origin(), Point3f::new(0.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_hidden_parent_hides_subtree() {
        let mut graph = SceneGraph::new();
        let a = graph.add(graph.root(), Node::group("a"));
        let b = graph.add(a, Node::group("b"));
        let c = graph.add(graph.root(), Node::group("c"));

        graph.set_visible(a, false);
        assert!(!graph.is_visible_in_world(b));
        assert!(graph.is_visible_in_world(c));

        let visible: Vec<NodeId> = graph.walk_visible().into_iter().map(|(id, _)| id).collect();
        assert_eq!(visible, vec![graph.root(), c]);
    }

    #[test]
    fn test_walk_is_depth_first_in_insertion_order() {
        let mut graph = SceneGraph::new();
        let a = graph.add(graph.root(), Node::group("a"));
        let a1 = graph.add(a, Node::group("a1"));
        let b = graph.add(graph.root(), Node::group("b"));

        let order: Vec<NodeId> = graph.walk_visible().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![graph.root(), a, a1, b]);
        assert_eq!(graph.find("a1"), Some(a1));
        assert_eq!(graph.find("missing"), None);
    }

    #[test]
    fn test_advance_runs_behaviours() {
        let mut graph = SceneGraph::new();
        let spinner = graph.add(graph.root(), Node::group("spinner").with_behaviour(Behaviour::spin_y(0.01)));
        graph.advance(0.5, 0.5, true);
        assert_relative_eq!(graph.node(spinner).transform.rotation.y, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_shared_resources() {
        let mut graph = SceneGraph::new();
        let handle = graph.add_mesh(TriangleMesh::uv_sphere(1.0, 8, 8).unwrap());
        assert!(graph.is_empty());
        graph.add(graph.root(), Node::mesh("a", handle, Default::default()));
        graph.add(graph.root(), Node::mesh("b", handle, Default::default()));
        assert_eq!(graph.meshes().len(), 1);
        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty());
    }
}
