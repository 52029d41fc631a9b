//! 3D transformation utilities

use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Affine transform of a scene node, stored as a homogeneous matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation, then XYZ-order Euler rotation, then scale (`T * R * S`).
    ///
    /// The Euler order matches the intrinsic X-then-Y-then-Z convention used
    /// by scene nodes, i.e. `R = Rx * Ry * Rz`.
    pub fn from_trs(translation: Vector3<f32>, euler_xyz: Vector3<f32>, scale: Vector3<f32>) -> Self {
        let rotation = euler_xyz_rotation(euler_xyz);
        Self {
            matrix: Matrix4::new_translation(&translation)
                * rotation.to_homogeneous()
                * Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Translation component
    pub fn origin(&self) -> Point3<f32> {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Largest axis scale factor, used to grow bounding spheres
    pub fn max_scale(&self) -> f32 {
        (0..3)
            .map(|c| self.matrix.fixed_view::<3, 1>(0, c).norm())
            .fold(0.0, f32::max)
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

/// Rotation for XYZ-ordered Euler angles in radians
pub fn euler_xyz_rotation(euler: Vector3<f32>) -> UnitQuaternion<f32> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), euler.x);
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), euler.y);
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler.z);
    rx * ry * rz
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_trs_applies_scale_then_rotation_then_translation() {
        let t = Transform3D::from_trs(
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, FRAC_PI_2, 0.0),
            Vector3::new(2.0, 2.0, 2.0),
        );
        // +X scaled to 2, rotated a quarter turn about Y to -Z, then shifted
        let p = t.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 0.0, -2.0), epsilon = 1e-5);
        assert_relative_eq!(t.max_scale(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(t.origin(), Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_compose_applies_right_first() {
        let parent = Transform3D::from_trs(Vector3::new(5.0, 0.0, 0.0), Vector3::zeros(), Vector3::new(2.0, 2.0, 2.0));
        let child = Transform3D::from_trs(Vector3::new(1.0, 0.0, 0.0), Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let world = parent * child;
        assert_relative_eq!(world.origin(), Point3::new(7.0, 0.0, 0.0));
        assert_relative_eq!(world.max_scale(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ring_plane_rotation() {
        // A ring lying in XY turned a quarter turn about X lies in XZ
        let t = Transform3D::from_trs(
            Vector3::zeros(),
            Vector3::new(FRAC_PI_2, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let p = t.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z.abs(), 1.0, epsilon = 1e-6);
    }
}
