//! Triangle fans closing the open ends of a tubular mesh.

use sor_core::{Result, SorError};
use sor_math::{Point3, Vector3};

use crate::buffers::GeometryBuffers;

/// Which end of the `t` axis is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapSide {
    /// Faces +Y.
    Top,
    /// Faces -Y.
    Bottom,
}

impl CapSide {
    pub fn normal(self) -> Vector3 {
        match self {
            CapSide::Top => Vector3::Y,
            CapSide::Bottom => Vector3::NEG_Y,
        }
    }
}

/// Append a pole vertex at `pole` and a fan of `cols` triangles joining
/// every adjacent pair of the ring starting at `ring_first` to it.
///
/// The top fan runs `(j, j+1, pole)` and the bottom fan `(j+1, j, pole)` so
/// both face away from the body. Returns the pole's vertex index.
pub fn stitch_cap(
    buffers: &mut GeometryBuffers,
    ring_first: u32,
    cols: usize,
    pole: Point3,
    side: CapSide,
) -> Result<u32> {
    if cols < 3 {
        return Err(SorError::config(format!(
            "cap needs at least 3 ring vertices, got {}",
            cols
        )));
    }
    if ring_first as usize + cols > buffers.vertex_count() {
        return Err(SorError::InvalidOperation(format!(
            "cap ring {}..{} is outside the {} buffered vertices",
            ring_first,
            ring_first as usize + cols,
            buffers.vertex_count()
        )));
    }

    let pole_index = buffers.push_vertex(pole, side.normal())?;
    let cols = crate::buffers::to_index(cols)?;
    for j in 0..cols {
        let here = ring_first + j;
        let next = ring_first + (j + 1) % cols;
        match side {
            CapSide::Top => buffers.push_triangle([here, next, pole_index]),
            CapSide::Bottom => buffers.push_triangle([next, here, pole_index]),
        }
    }
    Ok(pole_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn ring_at(buffers: &mut GeometryBuffers, y: f64, cols: usize) -> u32 {
        let first = buffers.vertex_count() as u32;
        for j in 0..cols {
            let theta = TAU * j as f64 / cols as f64;
            buffers.push_vertex(
                Point3::new(theta.cos(), y, -theta.sin()),
                Vector3::new(theta.cos(), 0.0, -theta.sin()),
            )
            .unwrap();
        }
        first
    }

    fn fan_normals(buffers: &GeometryBuffers) -> Vec<Vector3> {
        buffers
            .indices()
            .chunks_exact(3)
            .map(|tri| {
                let p = |k: u32| buffers.position(k);
                (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
            })
            .collect()
    }

    #[test]
    fn test_top_fan_faces_up() {
        let mut buffers = GeometryBuffers::new();
        let first = ring_at(&mut buffers, 1.0, 6);
        let pole = stitch_cap(&mut buffers, first, 6, Point3::new(0.0, 1.0, 0.0), CapSide::Top).unwrap();
        assert_eq!(pole, 6);
        assert_eq!(buffers.vertex_count(), 7);
        assert_eq!(buffers.index_count(), 6 * 3);
        assert_eq!(buffers.normal(pole), Vector3::Y);
        for n in fan_normals(&buffers) {
            assert!(n.y > 0.0 && n.x.abs() < 1e-12 && n.z.abs() < 1e-12);
        }
    }

    #[test]
    fn test_bottom_fan_faces_down() {
        let mut buffers = GeometryBuffers::new();
        let first = ring_at(&mut buffers, -1.0, 5);
        stitch_cap(&mut buffers, first, 5, Point3::new(0.0, -1.0, 0.0), CapSide::Bottom).unwrap();
        for n in fan_normals(&buffers) {
            assert!(n.y < 0.0);
        }
        // The closing triangle reuses the first ring vertex
        assert_eq!(&buffers.indices()[12..15], &[0, 4, 5]);
    }

    #[test]
    fn test_rejects_out_of_range_ring() {
        let mut buffers = GeometryBuffers::new();
        ring_at(&mut buffers, 1.0, 4);
        assert!(stitch_cap(&mut buffers, 2, 4, Point3::Y, CapSide::Top).is_err());
        assert!(stitch_cap(&mut buffers, 0, 2, Point3::Y, CapSide::Top).is_err());
        assert_eq!(buffers.vertex_count(), 4);
    }
}
