//! Triangle meshes and primitive builders
//!
//! The builders follow the usual Y-up conventions for real-time scenes:
//! spheres have their poles on the Y axis with a UV seam at +X, rings lie
//! flat in the XY plane facing +Z, and cylinders/cones are centered on the
//! origin along Y. Every builder produces per-vertex normals and UVs.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub uvs: Option<Vec<[f32; 2]>>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Unit normal of each face from its winding
    pub fn face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let v0 = self.vertices[a];
                (self.vertices[b] - v0).cross(&(self.vertices[c] - v0)).normalize()
            })
            .collect()
    }

    /// Axis-aligned bounds; the origin twice for an empty mesh
    pub fn bounding_box(&self) -> (Point3f, Point3f) {
        let Some(first) = self.vertices.first() else {
            return (Point3f::origin(), Point3f::origin());
        };
        self.vertices.iter().fold((*first, *first), |(min, max), v| {
            (min.inf(v), max.sup(v))
        })
    }

    /// Distance of the farthest vertex from the local origin
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.coords.norm())
            .fold(0.0, f32::max)
    }

    /// Flattened `u32` index buffer
    pub fn indices_u32(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|f| [f[0] as u32, f[1] as u32, f[2] as u32])
            .collect()
    }

    /// UV sphere centered on the origin
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Result<Self> {
        if radius <= 0.0 {
            return Err(Error::InvalidParameter("sphere radius must be positive".to_string()));
        }
        let width_segments = width_segments.max(3) as usize;
        let height_segments = height_segments.max(2) as usize;

        let mut builder = MeshBuilder::default();
        let mut grid = Vec::with_capacity(height_segments + 1);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            // Shift pole UVs so the pole triangles sample the middle of their segment
            let u_offset = if iy == 0 {
                0.5 / width_segments as f32
            } else if iy == height_segments {
                -0.5 / width_segments as f32
            } else {
                0.0
            };

            let mut row = Vec::with_capacity(width_segments + 1);
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let position = Point3f::new(
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                );
                let normal = position.coords / radius;
                row.push(builder.vertex(position, normal, [u + u_offset, 1.0 - v]));
            }
            grid.push(row);
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    builder.face(a, b, d);
                }
                if iy != height_segments - 1 {
                    builder.face(b, c, d);
                }
            }
        }

        Ok(builder.build())
    }

    /// Flat annulus in the XY plane, facing +Z
    pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> Result<Self> {
        if inner_radius < 0.0 || outer_radius <= inner_radius {
            return Err(Error::InvalidParameter(format!(
                "ring radii must satisfy 0 <= inner < outer (got {} and {})",
                inner_radius, outer_radius
            )));
        }
        let theta_segments = theta_segments.max(3) as usize;
        let normal = Vector3f::new(0.0, 0.0, 1.0);

        let mut builder = MeshBuilder::default();
        for radius in [inner_radius, outer_radius] {
            for i in 0..=theta_segments {
                let segment = i as f32 / theta_segments as f32 * TAU;
                let x = radius * segment.cos();
                let y = radius * segment.sin();
                let uv = [(x / outer_radius + 1.0) / 2.0, (y / outer_radius + 1.0) / 2.0];
                builder.vertex(Point3f::new(x, y, 0.0), normal, uv);
            }
        }

        for i in 0..theta_segments {
            let a = i;
            let b = i + theta_segments + 1;
            let c = i + theta_segments + 2;
            let d = i + 1;
            builder.face(a, b, d);
            builder.face(b, c, d);
        }

        Ok(builder.build())
    }

    /// Cylinder along Y centered on the origin, with caps
    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    ) -> Result<Self> {
        if radius_top < 0.0 || radius_bottom < 0.0 || (radius_top == 0.0 && radius_bottom == 0.0) {
            return Err(Error::InvalidParameter("cylinder needs a positive radius".to_string()));
        }
        if height <= 0.0 {
            return Err(Error::InvalidParameter("cylinder height must be positive".to_string()));
        }
        let radial_segments = radial_segments.max(3) as usize;
        let half_height = height / 2.0;
        let slope = (radius_bottom - radius_top) / height;

        let mut builder = MeshBuilder::default();

        // Torso
        let mut rows = [Vec::new(), Vec::new()];
        for (y, row) in rows.iter_mut().enumerate() {
            let v = y as f32;
            let radius = v * (radius_bottom - radius_top) + radius_top;
            for x in 0..=radial_segments {
                let u = x as f32 / radial_segments as f32;
                let theta = u * TAU;
                let (sin, cos) = theta.sin_cos();
                let position = Point3f::new(radius * sin, -v * height + half_height, radius * cos);
                let normal = Vector3f::new(sin, slope, cos).normalize();
                row.push(builder.vertex(position, normal, [u, 1.0 - v]));
            }
        }
        for x in 0..radial_segments {
            let a = rows[0][x];
            let b = rows[1][x];
            let c = rows[1][x + 1];
            let d = rows[0][x + 1];
            builder.face(a, b, d);
            builder.face(b, c, d);
        }

        if radius_top > 0.0 {
            builder.cap(radius_top, half_height, radial_segments, true);
        }
        if radius_bottom > 0.0 {
            builder.cap(radius_bottom, half_height, radial_segments, false);
        }

        Ok(builder.build())
    }

    /// Cone along Y with its apex at `+height / 2`
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Result<Self> {
        Self::cylinder(0.0, radius, height, radial_segments)
    }
}

/// Accumulates vertices with normals and UVs for the primitive builders
#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<Point3f>,
    normals: Vec<Vector3f>,
    uvs: Vec<[f32; 2]>,
    faces: Vec<[usize; 3]>,
}

impl MeshBuilder {
    fn vertex(&mut self, position: Point3f, normal: Vector3f, uv: [f32; 2]) -> usize {
        self.vertices.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        self.vertices.len() - 1
    }

    fn face(&mut self, a: usize, b: usize, c: usize) {
        self.faces.push([a, b, c]);
    }

    fn cap(&mut self, radius: f32, half_height: f32, radial_segments: usize, top: bool) {
        let sign = if top { 1.0 } else { -1.0 };
        let normal = Vector3f::new(0.0, sign, 0.0);

        let center_start = self.vertices.len();
        for _ in 0..radial_segments {
            self.vertex(Point3f::new(0.0, half_height * sign, 0.0), normal, [0.5, 0.5]);
        }

        let rim_start = self.vertices.len();
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.vertex(
                Point3f::new(radius * sin, half_height * sign, radius * cos),
                normal,
                [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
            );
        }

        for x in 0..radial_segments {
            let c = center_start + x;
            let i = rim_start + x;
            if top {
                self.face(i, i + 1, c);
            } else {
                self.face(i + 1, i, c);
            }
        }
    }

    fn build(self) -> TriangleMesh {
        TriangleMesh {
            vertices: self.vertices,
            faces: self.faces,
            normals: Some(self.normals),
            uvs: Some(self.uvs),
        }
    }
}
