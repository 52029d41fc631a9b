//! The eight planets of the solar system view

use cosmic_core::Rgb;

/// A flat ring around a planet, in units of the planet's own scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetRing {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: u32,
}

/// Static description of a planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    /// Orbit radius around the sun
    pub distance: f32,
    /// Sphere radius
    pub size: f32,
    /// Packed `0xRRGGBB` tint used as the emissive color
    pub color: u32,
    /// Spin about the planet's own axis, radians per reference frame
    pub rotation_speed: f32,
    /// Orbital angular speed, radians per reference frame
    pub orbit_speed: f32,
    pub description: &'static str,
    pub texture: &'static str,
    pub ring: Option<PlanetRing>,
}

impl Planet {
    /// Every planet in orbit order
    pub fn all() -> &'static [Planet] {
        &PLANETS
    }

    /// Case-sensitive lookup by name
    pub fn by_name(name: &str) -> Option<&'static Planet> {
        PLANETS.iter().find(|p| p.name == name)
    }

    pub fn tint(&self) -> Rgb {
        Rgb::from_rgb24(self.color)
    }
}

impl PlanetRing {
    pub fn tint(&self) -> Rgb {
        Rgb::from_rgb24(self.color)
    }
}

static PLANETS: [Planet; 8] = [
    Planet {
        name: "Mercury",
        distance: 10.0,
        size: 0.8,
        color: 0x8c7853,
        rotation_speed: 0.004,
        orbit_speed: 0.04,
        description: "The smallest and innermost planet in our solar system",
        texture: "textures/mercury.jpg",
        ring: None,
    },
    Planet {
        name: "Venus",
        distance: 14.0,
        size: 0.95,
        color: 0xffc649,
        rotation_speed: 0.002,
        orbit_speed: 0.015,
        description: "The hottest planet with a thick, toxic atmosphere",
        texture: "textures/venus.jpg",
        ring: None,
    },
    Planet {
        name: "Earth",
        distance: 18.0,
        size: 1.0,
        color: 0x6b93d6,
        rotation_speed: 0.01,
        orbit_speed: 0.01,
        description: "Our beautiful blue home planet, the only known world with life",
        texture: "textures/earth.jpg",
        ring: None,
    },
    Planet {
        name: "Mars",
        distance: 22.0,
        size: 0.9,
        color: 0xcd5c5c,
        rotation_speed: 0.009,
        orbit_speed: 0.008,
        description: "The red planet, a cold desert world with the largest volcano in the solar system",
        texture: "textures/mars.jpg",
        ring: None,
    },
    Planet {
        name: "Jupiter",
        distance: 30.0,
        size: 2.0,
        color: 0xd8ca9d,
        rotation_speed: 0.02,
        orbit_speed: 0.004,
        description: "The largest planet, a gas giant with over 80 moons including the four Galilean moons",
        texture: "textures/jupiter.jpg",
        ring: None,
    },
    Planet {
        name: "Saturn",
        distance: 38.0,
        size: 1.7,
        color: 0xfad5a5,
        rotation_speed: 0.018,
        orbit_speed: 0.003,
        description: "The ringed planet, famous for its spectacular ring system made of ice and rock",
        texture: "textures/saturn.jpg",
        ring: Some(PlanetRing {
            inner_radius: 1.8,
            outer_radius: 2.8,
            color: 0xe5d8b0,
        }),
    },
    Planet {
        name: "Uranus",
        distance: 46.0,
        size: 1.4,
        color: 0x4fd0e7,
        rotation_speed: 0.015,
        orbit_speed: 0.002,
        description: "An ice giant that rotates on its side, with faint rings and 27 known moons",
        texture: "textures/uranus.jpg",
        ring: Some(PlanetRing {
            inner_radius: 1.5,
            outer_radius: 2.0,
            color: 0xa0e0f0,
        }),
    },
    Planet {
        name: "Neptune",
        distance: 54.0,
        size: 1.3,
        color: 0x4b70dd,
        rotation_speed: 0.016,
        orbit_speed: 0.001,
        description: "The windiest planet with storms reaching speeds of 2,100 km/h",
        texture: "textures/neptune.jpg",
        ring: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planets_in_orbit_order() {
        let distances: Vec<f32> = Planet::all().iter().map(|p| p.distance).collect();
        assert_eq!(distances, vec![10.0, 14.0, 18.0, 22.0, 30.0, 38.0, 46.0, 54.0]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Planet::by_name("Saturn").map(|p| p.size), Some(1.7));
        assert!(Planet::by_name("saturn").is_none());
        assert!(Planet::by_name("Pluto").is_none());
    }

    #[test]
    fn test_only_ice_and_gas_giants_have_rings() {
        let ringed: Vec<&str> = Planet::all()
            .iter()
            .filter(|p| p.ring.is_some())
            .map(|p| p.name)
            .collect();
        assert_eq!(ringed, vec!["Saturn", "Uranus"]);
    }

    #[test]
    fn test_orbits_do_not_overlap() {
        for pair in Planet::all().windows(2) {
            let outer_edge = pair[0].distance + pair[0].size;
            let inner_edge = pair[1].distance - pair[1].size;
            assert!(outer_edge < inner_edge, "{} overlaps {}", pair[0].name, pair[1].name);
        }
    }
}
