//! # Cosmic Scene
//!
//! Scene graph and scene content for the explorer: the galaxy with its
//! solar system marker, the solar system with its planets, the parallax
//! background, ray picking and the interaction state machine that moves
//! between the two views.
//!
//! Nothing here touches the GPU; a renderer walks [`SceneGraph::walk_visible`]
//! and draws what it finds.

pub mod graph;
pub mod material;
pub mod behaviour;
pub mod catalog;
pub mod background;
pub mod galaxy;
pub mod solar;
pub mod universe;
pub mod picking;
pub mod explorer;

pub use graph::{CloudHandle, Label, LocalTransform, MeshHandle, Node, NodeId, NodeKind, SceneGraph};
pub use material::{Blending, Light, MeshMaterial, PointsMaterial, Side};
pub use behaviour::{Axis, Behaviour, REFERENCE_FPS};
pub use catalog::{Planet, PlanetRing};
pub use galaxy::{GalaxyNodes, SOLAR_SYSTEM_POSITION};
pub use solar::{PlanetNodes, SolarNodes};
pub use universe::{Universe, UniverseParams};
pub use picking::{pick, PickHit, PickTarget};
pub use explorer::{ExplorerEvent, ExplorerState, SolarState, View};
