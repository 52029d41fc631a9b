//! Galaxy view: spiral particle layers, glowing core and the solar system marker

use crate::behaviour::Behaviour;
use crate::graph::{Label, Node, NodeId, SceneGraph};
use crate::material::{Blending, Light, MeshMaterial, PointsMaterial, Side};
use crate::picking::PickTarget;
use cosmic_core::{Point3f, Result, Rgb, TriangleMesh};
use cosmic_galaxy::GalaxyField;
use std::f32::consts::FRAC_PI_4;

/// Where the solar system sits inside the galaxy disk
pub const SOLAR_SYSTEM_POSITION: [f32; 3] = [42.0, 0.5, 22.0];

const CYAN: u32 = 0x00ffff;

/// Node ids of the galaxy subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalaxyNodes {
    pub root: NodeId,
    pub arms: NodeId,
    pub glow: NodeId,
    pub dust: NodeId,
    pub core: NodeId,
    pub marker: NodeId,
    pub marker_sphere: NodeId,
}

/// Build the galaxy under `parent`, taking ownership of the generated layers
pub fn build_galaxy(graph: &mut SceneGraph, parent: NodeId, field: GalaxyField) -> Result<GalaxyNodes> {
    let root = graph.add(parent, Node::group("galaxy").with_behaviour(Behaviour::spin_y(0.0002)));

    let GalaxyField { arms, glow, dust } = field;
    let arms = graph.add_cloud(arms);
    let glow = graph.add_cloud(glow);
    let dust = graph.add_cloud(dust);

    let arms = graph.add(
        root,
        Node::points("galaxy.arms", arms, PointsMaterial::new(0.3, 0.9, Blending::Additive))
            .with_behaviour(Behaviour::spin_y(0.00015)),
    );
    let glow = graph.add(
        root,
        Node::points("galaxy.glow", glow, PointsMaterial::new(0.5, 0.7, Blending::Additive))
            .with_behaviour(Behaviour::spin_y(0.0001)),
    );
    let dust = graph.add(
        root,
        Node::points("galaxy.dust", dust, PointsMaterial::new(1.0, 0.6, Blending::Normal))
            .with_behaviour(Behaviour::spin_y(0.00018)),
    );

    let core_mesh = graph.add_mesh(TriangleMesh::uv_sphere(6.0, 32, 32)?);
    let core = graph.add(
        root,
        Node::mesh(
            "galaxy.core",
            core_mesh,
            MeshMaterial::new(Rgb::from_rgb24(0xffeebb))
                .emissive(Rgb::from_rgb24(0xffcc77), 3.0)
                .opacity(0.95)
                .surface(0.5, 0.2),
        )
        .with_behaviour(Behaviour::spin_y(0.0005))
        .with_behaviour(Behaviour::pulse(0.01, 1.0)),
    );

    let core_glow_mesh = graph.add_mesh(TriangleMesh::uv_sphere(15.0, 32, 32)?);
    graph.add(
        root,
        Node::mesh(
            "galaxy.core_glow",
            core_glow_mesh,
            MeshMaterial::new(Rgb::from_rgb24(0xffdd99))
                .emissive(Rgb::from_rgb24(0xffaa66), 1.5)
                .opacity(0.4)
                .side(Side::Back)
                .surface(0.7, 0.0),
        ),
    );

    let (marker, marker_sphere) = build_marker(graph, root)?;

    log::debug!("galaxy subtree built with {} nodes in graph", graph.len());

    Ok(GalaxyNodes {
        root,
        arms,
        glow,
        dust,
        core,
        marker,
        marker_sphere,
    })
}

/// Clickable cyan beacon with an arrow, a connector and a label
fn build_marker(graph: &mut SceneGraph, parent: NodeId) -> Result<(NodeId, NodeId)> {
    let cyan = Rgb::from_rgb24(CYAN);
    let [x, y, z] = SOLAR_SYSTEM_POSITION;
    let marker = graph.add(parent, Node::group("galaxy.marker").at(x, y, z));

    let beacon = graph.add(marker, Node::group("galaxy.marker.beacon"));
    let sphere_mesh = graph.add_mesh(TriangleMesh::uv_sphere(1.5, 32, 32)?);
    let sphere = graph.add(
        beacon,
        Node::mesh(
            "galaxy.marker.sphere",
            sphere_mesh,
            MeshMaterial::new(cyan).emissive(cyan, 4.0).opacity(0.95).surface(0.3, 0.7),
        )
        .pickable(PickTarget::SolarSystemMarker),
    );
    let halo_mesh = graph.add_mesh(TriangleMesh::uv_sphere(2.2, 32, 32)?);
    graph.add(
        beacon,
        Node::mesh(
            "galaxy.marker.glow",
            halo_mesh,
            MeshMaterial::new(cyan)
                .emissive(cyan, 1.5)
                .opacity(0.3)
                .side(Side::Back)
                .surface(0.8, 0.0),
        ),
    );

    let arrow = graph.add(marker, Node::group("galaxy.marker.arrow").at(0.0, 3.5, 0.0).rotated(0.0, 0.0, FRAC_PI_4));
    let head = graph.add_mesh(TriangleMesh::cone(0.8, 2.0, 4)?);
    graph.add(arrow, Node::mesh("galaxy.marker.arrow.head", head, MeshMaterial::new(cyan).emissive(cyan, 3.0)));
    let stem = graph.add_mesh(TriangleMesh::cylinder(0.2, 0.2, 3.0, 8)?);
    graph.add(
        arrow,
        Node::mesh("galaxy.marker.arrow.stem", stem, MeshMaterial::new(cyan).emissive(cyan, 3.0)).at(0.0, -1.5, 0.0),
    );

    graph.add(
        marker,
        Node::label(
            "galaxy.marker.label",
            Label::new("Our Solar System", 1.2, cyan).outlined(Rgb::BLACK),
        )
        .at(0.0, 6.0, 0.0),
    );

    let connector = graph.add_mesh(TriangleMesh::cylinder(0.05, 0.05, 2.0, 8)?);
    graph.add(
        marker,
        Node::mesh(
            "galaxy.marker.connector",
            connector,
            MeshMaterial::new(cyan).emissive(cyan, 2.0).opacity(0.8),
        )
        .at(0.0, 1.5, 0.0),
    );

    Ok((marker, sphere))
}

/// Lights shared by both views
pub fn galaxy_lights() -> Vec<Light> {
    vec![
        Light::ambient(0.15),
        Light::point(Point3f::new(60.0, 60.0, 60.0), Rgb::from_rgb24(0x4455ff), 1.2),
        Light::point(Point3f::new(-60.0, -60.0, -60.0), Rgb::from_rgb24(0xff44aa), 0.4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use cosmic_galaxy::GalaxyFieldParams;

    fn small_galaxy() -> (SceneGraph, GalaxyNodes) {
        let field = GalaxyField::generate(&GalaxyFieldParams::default().scaled(0.001), 7).unwrap();
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let nodes = build_galaxy(&mut graph, root, field).unwrap();
        (graph, nodes)
    }

    #[test]
    fn test_layers_are_points_with_expected_materials() {
        let (graph, nodes) = small_galaxy();
        let expect = |id: NodeId, size: f32, blending: Blending| match &graph.node(id).kind {
            NodeKind::Points { material, .. } => {
                assert_eq!(material.size, size);
                assert_eq!(material.blending, blending);
                assert!(!material.depth_write);
            }
            other => panic!("expected points, got {:?}", other),
        };
        expect(nodes.arms, 0.3, Blending::Additive);
        expect(nodes.glow, 0.5, Blending::Additive);
        expect(nodes.dust, 1.0, Blending::Normal);
        assert_eq!(graph.clouds().len(), 3);
    }

    #[test]
    fn test_marker_is_the_only_pickable_node() {
        let (graph, nodes) = small_galaxy();
        let pickable: Vec<NodeId> = graph
            .walk_visible()
            .into_iter()
            .filter(|(id, _)| graph.node(*id).pickable.is_some())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(pickable, vec![nodes.marker_sphere]);

        let origin = graph.world_transform(nodes.marker_sphere).origin();
        assert!((origin - Point3f::new(42.0, 0.5, 22.0)).norm() < 1e-4);
    }

    #[test]
    fn test_core_pulses() {
        let (mut graph, nodes) = small_galaxy();
        graph.advance(0.016, std::f32::consts::FRAC_PI_2, true);
        let scale = graph.node(nodes.core).transform.scale;
        assert!((scale.x - 1.01).abs() < 1e-5);
    }
}
