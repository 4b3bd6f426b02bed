use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, stored as its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin with the given half extents.
    pub fn symmetric(half: Vector3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut min = first;
        let mut max = first;
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    /// Contains check that tolerates points sitting `eps` outside a face.
    pub fn contains_point_eps(&self, p: Point3, eps: f64) -> bool {
        let pad = Vector3::splat(eps);
        p.cmpge(self.min - pad).all() && p.cmple(self.max + pad).all()
    }

    /// Nearest point inside the box.
    pub fn clamp_point(&self, p: Point3) -> Point3 {
        p.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_from_points() {
        let pts = vec![dvec3(1.0, 2.0, 3.0), dvec3(-1.0, 5.0, 0.0), dvec3(3.0, -1.0, 2.0)];
        let aabb = Aabb3::from_points(&pts).unwrap();
        assert_eq!(aabb.min, dvec3(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, dvec3(3.0, 5.0, 3.0));
        assert!(Aabb3::from_points(&[]).is_none());
    }

    #[test]
    fn test_symmetric_box() {
        let aabb = Aabb3::symmetric(dvec3(0.44, 0.04, 0.44));
        assert_eq!(aabb.min, dvec3(-0.44, -0.04, -0.44));
        assert_eq!(aabb.max, dvec3(0.44, 0.04, 0.44));
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 1.0, 1.0));
        assert!(aabb.contains_point_eps(dvec3(0.5, 0.5, 0.5), 0.0));
        assert!(!aabb.contains_point_eps(dvec3(1.5, 0.5, 0.5), 1e-6));
        assert!(aabb.contains_point_eps(dvec3(1.0 + 1e-9, 0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_clamp_point() {
        let aabb = Aabb3::symmetric(Vector3::splat(3.0));
        assert_eq!(aabb.clamp_point(dvec3(5.0, -4.0, 1.0)), dvec3(3.0, -3.0, 1.0));
    }
}
