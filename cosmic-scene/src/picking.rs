//! Ray picking against scene nodes

use crate::graph::{NodeId, NodeKind, SceneGraph};
use cosmic_core::Ray;

/// What a pickable node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// The marker in the galaxy that leads to the solar system view
    SolarSystemMarker,
    /// A planet, by catalog name
    Planet(&'static str),
}

/// Nearest pickable node hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub target: PickTarget,
    pub distance: f32,
}

/// Find the nearest visible pickable mesh along `ray`
///
/// Each candidate is tested against its world-space bounding sphere: the
/// mesh's bounding radius grown by the node's largest world scale axis.
/// Hidden nodes (or nodes under a hidden ancestor) are never hit.
pub fn pick(graph: &SceneGraph, ray: &Ray) -> Option<PickHit> {
    graph
        .walk_visible()
        .into_iter()
        .filter_map(|(id, world)| {
            let node = graph.node(id);
            let target = node.pickable?;
            let NodeKind::Mesh { mesh, .. } = &node.kind else {
                return None;
            };

            let radius = graph.mesh(*mesh).bounding_radius() * world.max_scale();
            let distance = ray.intersect_sphere(&world.origin(), radius)?;
            Some(PickHit { node: id, target, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::material::MeshMaterial;
    use cosmic_core::{Point3f, TriangleMesh, Vector3f};

    fn sphere_graph() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(TriangleMesh::uv_sphere(1.0, 16, 12).unwrap());
        let near = graph.add(
            graph.root(),
            Node::mesh("near", mesh, MeshMaterial::default())
                .at(0.0, 0.0, -5.0)
                .pickable(PickTarget::Planet("Mercury")),
        );
        let far = graph.add(
            graph.root(),
            Node::mesh("far", mesh, MeshMaterial::default())
                .at(0.0, 0.0, -10.0)
                .pickable(PickTarget::Planet("Venus")),
        );
        (graph, near, far)
    }

    #[test]
    fn test_nearest_hit_wins() {
        let (graph, near, _) = sphere_graph();
        let ray = Ray::new(Point3f::origin(), Vector3f::new(0.0, 0.0, -1.0));
        let hit = pick(&graph, &ray).unwrap();
        assert_eq!(hit.node, near);
        assert_eq!(hit.target, PickTarget::Planet("Mercury"));
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let (mut graph, near, far) = sphere_graph();
        graph.set_visible(near, false);
        let ray = Ray::new(Point3f::origin(), Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&graph, &ray).map(|h| h.node), Some(far));
    }

    #[test]
    fn test_miss_returns_none() {
        let (graph, _, _) = sphere_graph();
        let ray = Ray::new(Point3f::origin(), Vector3f::new(0.0, 1.0, 0.0));
        assert!(pick(&graph, &ray).is_none());
    }

    #[test]
    fn test_scale_grows_pick_radius() {
        let (mut graph, near, _) = sphere_graph();
        // Just outside the unit sphere, inside once scaled by 1.1
        let ray = Ray::new(Point3f::new(1.05, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        assert_ne!(pick(&graph, &ray).map(|h| h.node), Some(near));

        graph.node_mut(near).transform.scale = Vector3f::new(1.1, 1.1, 1.1);
        assert_eq!(pick(&graph, &ray).map(|h| h.node), Some(near));
    }

    #[test]
    fn test_unpickable_meshes_are_ignored() {
        let mut graph = SceneGraph::new();
        let mesh = graph.add_mesh(TriangleMesh::uv_sphere(1.0, 8, 8).unwrap());
        graph.add(graph.root(), Node::mesh("decor", mesh, MeshMaterial::default()).at(0.0, 0.0, -5.0));
        let ray = Ray::new(Point3f::origin(), Vector3f::new(0.0, 0.0, -1.0));
        assert!(pick(&graph, &ray).is_none());
    }
}
