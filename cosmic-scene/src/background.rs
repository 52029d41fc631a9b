//! Slowly drifting background star shells, visible in both views

use crate::behaviour::{Axis, Behaviour};
use crate::graph::{Node, NodeId, SceneGraph};
use crate::material::{Blending, PointsMaterial};
use cosmic_core::Result;
use cosmic_galaxy::{generate_star_shell, StarShellParams};

/// Sprite scale applied to star sizes
pub const STAR_SPRITE_SIZE: f32 = 0.15;

/// Drift velocity of the parallax group, radians per reference frame
const PARALLAX_VELOCITY: f32 = 0.0001;

/// Build the parallax star group with one points node per shell
pub fn build_background(
    graph: &mut SceneGraph,
    parent: NodeId,
    shells: &[StarShellParams],
    seed: u64,
) -> Result<NodeId> {
    let group = graph.add(
        parent,
        Node::group("background.parallax")
            .with_behaviour(Behaviour::spin(Axis::X, PARALLAX_VELOCITY * 0.02))
            .with_behaviour(Behaviour::spin(Axis::Y, PARALLAX_VELOCITY * 0.03)),
    );

    for (i, shell) in shells.iter().enumerate() {
        let cloud = generate_star_shell(shell, seed.wrapping_add(i as u64 + 1))?;
        let handle = graph.add_cloud(cloud);
        graph.add(
            group,
            Node::points(
                format!("background.shell{}", i),
                handle,
                PointsMaterial::new(STAR_SPRITE_SIZE, 1.0, Blending::Additive),
            ),
        );
    }

    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_points_node_per_shell() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let group = build_background(&mut graph, root, &[StarShellParams::near(), StarShellParams::far()], 3).unwrap();

        assert_eq!(graph.node(group).children.len(), 2);
        assert_eq!(graph.clouds()[0].len(), 2000);
        assert_eq!(graph.clouds()[1].len(), 1000);
    }

    #[test]
    fn test_drifts_on_two_axes() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let group = build_background(&mut graph, root, &[], 3).unwrap();
        graph.advance(1.0, 1.0, false);
        let rotation = graph.node(group).transform.rotation;
        assert!(rotation.x > 0.0 && rotation.y > rotation.x);
        assert_eq!(rotation.z, 0.0);
    }
}
