//! Point cloud containers

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A field of colored, sized particles (galaxy arms, dust, star shells)
pub type ParticleCloud = PointCloud<Particle>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
        }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }
    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> IntoIterator for PointCloud<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl PointCloud<Particle> {
    /// Largest distance of any particle from `center`
    pub fn bounding_radius(&self, center: &Point3f) -> f32 {
        self.points
            .iter()
            .map(|p| (p.position - center).norm())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn particle(x: f32, y: f32, z: f32) -> Particle {
        Particle::new(Point3f::new(x, y, z), [1.0; 3], 1.0)
    }

    #[test]
    fn test_collect_and_index() {
        let cloud: ParticleCloud = (0..4).map(|i| particle(i as f32, 0.0, 0.0)).collect();
        assert_eq!(cloud.len(), 4);
        assert_relative_eq!(cloud[3].position.x, 3.0);
    }

    #[test]
    fn test_bounding_radius() {
        let cloud = ParticleCloud::from_points(vec![
            particle(-1.0, -2.0, -3.0),
            particle(1.0, 2.0, 3.0),
        ]);
        assert_relative_eq!(cloud.bounding_radius(&Point3f::origin()), 14.0_f32.sqrt());
    }

    #[test]
    fn test_empty_cloud_radius_is_zero() {
        let cloud = ParticleCloud::new();
        assert_eq!(cloud.bounding_radius(&Point3f::origin()), 0.0);
    }
}
