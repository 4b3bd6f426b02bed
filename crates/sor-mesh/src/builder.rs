//! Append sampled revolution surfaces to the shared buffers.

use sor_core::Result;
use sor_geometry::{
    sample_surface, CylinderSurface, GridResolution, RevolutionSurface, RingSurface, SurfaceGrid,
};
use sor_math::Aabb3;

use crate::buffers::{to_index, GeometryBuffers, IndexRange, VertexRange};
use crate::cap::{stitch_cap, CapSide};

/// Where one surface's body landed in the shared buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMesh {
    pub resolution: GridResolution,
    pub vertices: VertexRange,
    pub body: IndexRange,
    pub bounds: Aabb3,
}

/// Copy a sampled grid and its quad triangles into `buffers`.
/// Returns the index of the grid's first vertex.
fn append_grid(buffers: &mut GeometryBuffers, grid: &SurfaceGrid) -> Result<u32> {
    let first = to_index(buffers.vertex_count())?;
    for (p, n) in grid.positions.iter().zip(&grid.normals) {
        buffers.push_vertex(*p, *n)?;
    }
    for tri in grid.triangles() {
        buffers.push_triangle([first + tri[0], first + tri[1], first + tri[2]]);
    }
    Ok(first)
}

/// Cylinder body plus top and bottom caps.
///
/// Produces `rows * cols + 2` vertices and
/// `(rows - 1) * cols * 6 + 2 * cols * 3` indices.
pub fn build_cylinder(
    buffers: &mut GeometryBuffers,
    surface: &CylinderSurface,
    resolution: GridResolution,
) -> Result<SurfaceMesh> {
    let grid = sample_surface(surface, resolution)?;
    let vertex_start = buffers.vertex_count();
    let index_start = buffers.index_count();

    let first = append_grid(buffers, &grid)?;
    let cols = resolution.cols;
    let last_row = first + to_index((resolution.rows - 1) * cols)?;
    stitch_cap(buffers, first, cols, surface.top_pole(), CapSide::Top)?;
    stitch_cap(buffers, last_row, cols, surface.bottom_pole(), CapSide::Bottom)?;

    Ok(SurfaceMesh {
        resolution,
        vertices: VertexRange::new(
            to_index(vertex_start)?,
            to_index(buffers.vertex_count() - vertex_start)?,
        ),
        body: IndexRange::between(index_start, buffers.index_count())?,
        bounds: surface.local_bounds(),
    })
}

/// Ring body; both parametric axes wrap so no caps are needed.
///
/// Produces `rows * cols` vertices and `rows * cols * 6` indices.
pub fn build_ring(
    buffers: &mut GeometryBuffers,
    surface: &RingSurface,
    resolution: GridResolution,
) -> Result<SurfaceMesh> {
    let grid = sample_surface(surface, resolution)?;
    let vertex_start = buffers.vertex_count();
    let index_start = buffers.index_count();

    append_grid(buffers, &grid)?;

    Ok(SurfaceMesh {
        resolution,
        vertices: VertexRange::new(
            to_index(vertex_start)?,
            to_index(buffers.vertex_count() - vertex_start)?,
        ),
        body: IndexRange::between(index_start, buffers.index_count())?,
        bounds: surface.local_bounds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_smallest_grid() {
        let mut buffers = GeometryBuffers::new();
        let mesh = build_cylinder(&mut buffers, &CylinderSurface::new(), GridResolution::new(2, 4)).unwrap();
        assert_eq!(mesh.vertices, VertexRange::new(0, 10));
        assert_eq!(mesh.body, IndexRange::new(0, 48));
        // Poles follow the body vertices
        assert_eq!(buffers.position(8).y, 1.0);
        assert_eq!(buffers.position(9).y, -1.0);
    }

    #[test]
    fn test_cylinder_counts() {
        for &(rows, cols) in &[(2, 3), (5, 8), (25, 25)] {
            let mut buffers = GeometryBuffers::new();
            let mesh = build_cylinder(
                &mut buffers,
                &CylinderSurface::new(),
                GridResolution::new(rows, cols),
            )
            .unwrap();
            assert_eq!(mesh.vertices.count as usize, rows * cols + 2);
            assert_eq!(mesh.body.count as usize, (rows - 1) * cols * 6 + 2 * cols * 3);
        }
    }

    #[test]
    fn test_ring_counts_and_offsets() {
        let mut buffers = GeometryBuffers::new();
        build_cylinder(&mut buffers, &CylinderSurface::new(), GridResolution::new(2, 4)).unwrap();
        let ring = RingSurface::default();
        let mesh = build_ring(&mut buffers, &ring, GridResolution::new(3, 5)).unwrap();
        assert_eq!(mesh.vertices, VertexRange::new(10, 15));
        assert_eq!(mesh.body, IndexRange::new(48, 3 * 5 * 6));
        assert!(buffers.index_slice(mesh.body).iter().all(|&i| mesh.vertices.contains(i)));
    }

    #[test]
    fn test_failed_build_leaves_buffers_untouched() {
        let mut buffers = GeometryBuffers::new();
        assert!(build_ring(&mut buffers, &RingSurface::default(), GridResolution::new(2, 5)).is_err());
        assert_eq!(buffers.vertex_count(), 0);
        assert_eq!(buffers.index_count(), 0);
    }
}
