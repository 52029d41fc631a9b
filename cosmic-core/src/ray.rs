//! Rays for pointer picking

use crate::point::*;

/// A half-line with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
}

impl Ray {
    /// Create a ray; `direction` is normalized
    pub fn new(origin: Point3f, direction: Vector3f) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }

    /// Distance to the nearest intersection with a sphere, if any.
    ///
    /// A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, center: &Point3f, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(&self.direction);
        let c = oc.norm_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hit_in_front() {
        let ray = Ray::new(Point3f::new(0.0, 0.0, 10.0), Vector3f::new(0.0, 0.0, -2.0));
        let t = ray.intersect_sphere(&Point3f::origin(), 1.0).unwrap();
        assert_relative_eq!(t, 9.0);
        assert_relative_eq!(ray.at(t), Point3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_miss_and_behind() {
        let ray = Ray::new(Point3f::new(0.0, 5.0, 10.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(ray.intersect_sphere(&Point3f::origin(), 1.0).is_none());

        let away = Ray::new(Point3f::new(0.0, 0.0, 10.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(away.intersect_sphere(&Point3f::origin(), 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_sphere() {
        let ray = Ray::new(Point3f::origin(), Vector3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(ray.intersect_sphere(&Point3f::origin(), 3.0).unwrap(), 3.0);
    }
}
