//! Solar system view: the sun, its coronas and eight orbiting planets

use crate::background::STAR_SPRITE_SIZE;
use crate::behaviour::Behaviour;
use crate::catalog::Planet;
use crate::graph::{Label, Node, NodeId, SceneGraph};
use crate::material::{Blending, Light, MeshMaterial, PointsMaterial, Side};
use crate::picking::PickTarget;
use cosmic_core::{Point3f, Result, Rgb, TriangleMesh};
use cosmic_galaxy::{generate_star_shell, StarShellParams};
use std::f32::consts::FRAC_PI_2;

/// Drift of the surrounding star shell, radians per reference frame. Runs while paused.
const STAR_DRIFT: f32 = 0.0001;

/// Background color while the solar system is shown
pub const SOLAR_BACKGROUND: u32 = 0x111111;

/// Half the width of an orbit ring
const ORBIT_HALF_WIDTH: f32 = 0.2;

/// Node ids for one planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetNodes {
    pub planet: &'static Planet,
    /// Group spinning at the orbital speed
    pub orbit: NodeId,
    pub body: NodeId,
    pub label: NodeId,
    pub ring: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarNodes {
    pub root: NodeId,
    pub sun: NodeId,
    pub planets: Vec<PlanetNodes>,
}

impl SolarNodes {
    pub fn planet(&self, name: &str) -> Option<&PlanetNodes> {
        self.planets.iter().find(|p| p.planet.name == name)
    }
}

/// Build the solar system under `parent`
pub fn build_solar_system(
    graph: &mut SceneGraph,
    parent: NodeId,
    stars: &StarShellParams,
    seed: u64,
) -> Result<SolarNodes> {
    let root = graph.add(parent, Node::group("solar"));

    let star_cloud = graph.add_cloud(generate_star_shell(stars, seed)?);
    graph.add(
        root,
        Node::points(
            "solar.stars",
            star_cloud,
            PointsMaterial::new(STAR_SPRITE_SIZE, 1.0, Blending::Additive),
        )
        .with_behaviour(Behaviour::spin_y(STAR_DRIFT)),
    );

    let sun_mesh = graph.add_mesh(TriangleMesh::uv_sphere(3.0, 64, 64)?);
    let sun = graph.add(
        root,
        Node::mesh(
            "solar.sun",
            sun_mesh,
            MeshMaterial::default()
                .emissive(Rgb::from_rgb24(0xff6600), 2.0)
                .surface(0.1, 0.1)
                .texture("textures/sun.jpg"),
        )
        .with_behaviour(Behaviour::gated_spin_y(0.005)),
    );

    let corona = graph.add(root, Node::group("solar.corona"));
    for (name, radius, color, opacity, emissive, intensity) in [
        ("solar.corona.inner", 3.5, 0xffaa00, 0.5, 0xff6600, 1.0),
        ("solar.corona.outer", 4.5, 0xff8800, 0.3, 0xff4400, 0.8),
    ] {
        let mesh = graph.add_mesh(TriangleMesh::uv_sphere(radius, 32, 32)?);
        graph.add(
            corona,
            Node::mesh(
                name,
                mesh,
                MeshMaterial::new(Rgb::from_rgb24(color))
                    .emissive(Rgb::from_rgb24(emissive), intensity)
                    .opacity(opacity)
                    .side(Side::Back),
            ),
        );
    }

    let planets = Planet::all()
        .iter()
        .map(|planet| build_planet(graph, root, planet))
        .collect::<Result<Vec<_>>>()?;

    graph.add(
        root,
        Node::label(
            "solar.title",
            Label::new("Solar System Explorer", 1.5, Rgb::WHITE).outlined(Rgb::BLACK),
        )
        .at(0.0, 15.0, 0.0),
    );
    graph.add(
        root,
        Node::label(
            "solar.instructions",
            Label::new(
                "Click on planets to learn more about them\nUse mouse to rotate, scroll to zoom",
                0.6,
                Rgb::from_rgb24(0xaaaaaa),
            ),
        )
        .at(0.0, -15.0, 0.0),
    );

    log::debug!("solar system built with {} planets", planets.len());
    Ok(SolarNodes { root, sun, planets })
}

fn build_planet(graph: &mut SceneGraph, parent: NodeId, planet: &'static Planet) -> Result<PlanetNodes> {
    let orbit = graph.add(
        parent,
        Node::group(format!("solar.{}.orbit", planet.name))
            .with_behaviour(Behaviour::gated_spin_y(planet.orbit_speed)),
    );

    let track = graph.add_mesh(TriangleMesh::ring(
        planet.distance - ORBIT_HALF_WIDTH,
        planet.distance + ORBIT_HALF_WIDTH,
        128,
    )?);
    graph.add(
        orbit,
        Node::mesh(
            format!("solar.{}.track", planet.name),
            track,
            MeshMaterial::new(Rgb::from_rgb24(0x666666))
                .emissive(Rgb::from_rgb24(0x888888), 0.5)
                .opacity(0.5)
                .side(Side::Double)
                .surface(0.5, 0.2),
        )
        .rotated(FRAC_PI_2, 0.0, 0.0),
    );

    let sphere = graph.add_mesh(TriangleMesh::uv_sphere(planet.size, 64, 64)?);
    let body = graph.add(
        orbit,
        Node::mesh(
            format!("solar.{}", planet.name),
            sphere,
            MeshMaterial::default()
                .emissive(planet.tint(), 0.3)
                .surface(0.5, 0.2)
                .texture(planet.texture),
        )
        .at(planet.distance, 0.0, 0.0)
        .pickable(PickTarget::Planet(planet.name))
        .with_behaviour(Behaviour::gated_spin_y(planet.rotation_speed)),
    );

    let label = graph.add(
        orbit,
        Node::label(
            format!("solar.{}.label", planet.name),
            Label::new(planet.name, 0.5, Rgb::WHITE).outlined(Rgb::BLACK),
        )
        .at(planet.distance, planet.size + 1.5, 0.0)
        .hidden(),
    );

    let ring = match planet.ring {
        Some(ring) => {
            let group = graph.add(
                orbit,
                Node::group(format!("solar.{}.ring", planet.name))
                    .at(planet.distance, 0.0, 0.0)
                    .rotated(FRAC_PI_2, 0.2, 0.0),
            );
            let mesh = graph.add_mesh(TriangleMesh::ring(ring.inner_radius, ring.outer_radius, 64)?);
            graph.add(
                group,
                Node::mesh(
                    format!("solar.{}.ring.band", planet.name),
                    mesh,
                    MeshMaterial::new(ring.tint())
                        .emissive(ring.tint(), 0.5)
                        .opacity(0.9)
                        .side(Side::Double)
                        .surface(0.5, 0.3),
                ),
            );
            Some(group)
        }
        None => None,
    };

    Ok(PlanetNodes {
        planet,
        orbit,
        body,
        label,
        ring,
    })
}

/// Lights added on top of [`galaxy_lights`](crate::galaxy::galaxy_lights) in the solar view
pub fn solar_lights() -> Vec<Light> {
    vec![
        Light::ambient(0.5),
        Light::point(Point3f::origin(), Rgb::from_rgb24(0xff6600), 5.0),
        Light::point(Point3f::origin(), Rgb::WHITE, 2.0),
        Light::point(Point3f::new(0.0, 10.0, 10.0), Rgb::WHITE, 1.0),
    ]
}
