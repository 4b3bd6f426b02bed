//! Uniform grid sampling of revolution surfaces and quad triangulation.

use std::f64::consts::TAU;

use sor_core::{Result, SorError, Validate};
use sor_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::surface::{ParamAxis, RevolutionSurface};

/// Allowed drift of a sampled normal from unit length.
pub const UNIT_NORMAL_EPS: f64 = 1e-6;

/// Samples along each parametric axis: `rows` along `t`, `cols` around `θ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResolution {
    pub rows: usize,
    pub cols: usize,
}

impl GridResolution {
    pub const MIN_COLS: usize = 3;

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn vertex_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Validate against the sampling rules of a particular `t` axis.
    pub fn validate_for(&self, axis: ParamAxis) -> Result<()> {
        self.validate()?;
        if self.rows < axis.min_rows() {
            return Err(SorError::config(format!(
                "{} rows is too few for a {} surface (need at least {})",
                self.rows,
                if axis.wraps() { "periodic" } else { "open" },
                axis.min_rows()
            )));
        }
        Ok(())
    }
}

impl Validate for GridResolution {
    fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            return Err(SorError::config(format!(
                "grid needs at least 2 rows, got {}",
                self.rows
            )));
        }
        if self.cols < Self::MIN_COLS {
            return Err(SorError::config(format!(
                "grid needs at least {} columns, got {}",
                Self::MIN_COLS,
                self.cols
            )));
        }
        if u32::try_from(self.vertex_count()).is_err() {
            return Err(SorError::config(format!(
                "{}x{} grid overflows 32-bit indices",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

/// Row-major samples of a surface: all columns of row 0, then row 1, ...
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    pub resolution: GridResolution,
    pub wraps_t: bool,
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
}

impl SurfaceGrid {
    /// Local index of sample `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> u32 {
        (row * self.resolution.cols + col) as u32
    }

    pub fn triangles(&self) -> Vec<[u32; 3]> {
        grid_triangles(self.resolution, self.wraps_t)
    }
}

/// Evaluate `surface` and its exact normal on a `rows x cols` grid.
///
/// `θ` takes `cols` steps over `[0, 2π)`; the seam is closed by indexing,
/// never by duplicating vertices.
pub fn sample_surface(surface: &dyn RevolutionSurface, resolution: GridResolution) -> Result<SurfaceGrid> {
    let axis = surface.t_axis();
    resolution.validate_for(axis)?;

    let GridResolution { rows, cols } = resolution;
    let mut positions = Vec::with_capacity(rows * cols);
    let mut normals = Vec::with_capacity(rows * cols);

    for i in 0..rows {
        let t = axis.sample(i, rows);
        for j in 0..cols {
            let theta = TAU * j as f64 / cols as f64;
            let normal = surface.normal_at(t, theta);
            if (normal.length() - 1.0).abs() > UNIT_NORMAL_EPS {
                return Err(SorError::Geometry(format!(
                    "degenerate normal at t={:.6}, theta={:.6}",
                    t, theta
                )));
            }
            positions.push(surface.point_at(t, theta));
            normals.push(normal);
        }
    }

    Ok(SurfaceGrid {
        resolution,
        wraps_t: axis.wraps(),
        positions,
        normals,
    })
}

/// Two triangles per grid quad, local indices, outward (counter-clockwise) winding.
///
/// For row `i` and column `j` the quad `(i,j+1),(i,j),(i+1,j),(i+1,j+1)` is
/// split into `{(i,j+1),(i,j),(i+1,j)}` and `{(i,j+1),(i+1,j),(i+1,j+1)}`.
/// Columns always wrap; rows wrap only when `wrap_rows` is set.
pub fn grid_triangles(resolution: GridResolution, wrap_rows: bool) -> Vec<[u32; 3]> {
    let GridResolution { rows, cols } = resolution;
    let row_gaps = if wrap_rows { rows } else { rows.saturating_sub(1) };

    let idx = |i: usize, j: usize| -> u32 { ((i % rows) * cols + (j % cols)) as u32 };

    let mut triangles = Vec::with_capacity(row_gaps * cols * 2);
    for i in 0..row_gaps {
        for j in 0..cols {
            let top_right = idx(i, j + 1);
            let top_left = idx(i, j);
            let bottom_left = idx(i + 1, j);
            let bottom_right = idx(i + 1, j + 1);
            triangles.push([top_right, top_left, bottom_left]);
            triangles.push([top_right, bottom_left, bottom_right]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::surface::{CylinderSurface, RingSurface};

    fn face_normal(grid: &SurfaceGrid, tri: [u32; 3]) -> Vector3 {
        let p = |k: u32| grid.positions[k as usize];
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    #[test]
    fn test_cylinder_grid_counts() {
        let grid = sample_surface(&CylinderSurface::new(), GridResolution::new(4, 6)).unwrap();
        assert_eq!(grid.positions.len(), 24);
        assert_eq!(grid.normals.len(), 24);
        assert!(!grid.wraps_t);
        assert_eq!(grid.triangles().len(), 3 * 6 * 2);
    }

    #[test]
    fn test_cylinder_rows_span_top_to_bottom() {
        let grid = sample_surface(&CylinderSurface::new(), GridResolution::new(5, 3)).unwrap();
        assert_eq!(grid.positions[0].y, 1.0);
        assert_eq!(grid.positions[grid.index(4, 2) as usize].y, -1.0);
        assert_abs_diff_eq!(grid.positions[grid.index(2, 0) as usize].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ring_grid_wraps_rows() {
        let ring = RingSurface::new(0.4, 0.04).unwrap();
        let grid = sample_surface(&ring, GridResolution::new(5, 7)).unwrap();
        assert!(grid.wraps_t);
        let tris = grid.triangles();
        assert_eq!(tris.len(), 5 * 7 * 2);
        // The final row gap stitches row 4 back to row 0
        let last = tris[tris.len() - 1];
        assert_eq!(last, [grid.index(4, 0), grid.index(0, 6), grid.index(0, 0)]);
    }

    #[test]
    fn test_seam_column_closes_without_duplicates() {
        let tris = grid_triangles(GridResolution::new(2, 4), false);
        assert_eq!(tris.len(), 8);
        // Last quad of row 0 pairs column 3 with column 0
        assert_eq!(tris[6], [0, 3, 7]);
        assert_eq!(tris[7], [0, 7, 4]);
    }

    #[test]
    fn test_winding_is_outward() {
        let grid = sample_surface(&CylinderSurface::new(), GridResolution::new(3, 8)).unwrap();
        for tri in grid.triangles() {
            let n = face_normal(&grid, tri);
            let vertex_normal = grid.normals[tri[0] as usize];
            assert!(n.dot(vertex_normal) > 0.0, "inward triangle {:?}", tri);
        }

        let ring = RingSurface::new(0.4, 0.1).unwrap();
        let grid = sample_surface(&ring, GridResolution::new(12, 16)).unwrap();
        for tri in grid.triangles() {
            let n = face_normal(&grid, tri);
            let avg = tri.iter().map(|&k| grid.normals[k as usize]).sum::<Vector3>();
            assert!(n.dot(avg) > 0.0, "inward triangle {:?}", tri);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let ring = RingSurface::new(0.4, 0.04).unwrap();
        let grid = sample_surface(&ring, GridResolution::new(25, 35)).unwrap();
        for n in &grid.normals {
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = UNIT_NORMAL_EPS);
        }
    }

    #[test]
    fn test_samples_stay_inside_bounds() {
        let ring = RingSurface::new(0.4, 0.04).unwrap();
        let bounds = ring.local_bounds();
        let grid = sample_surface(&ring, GridResolution::new(25, 35)).unwrap();
        for p in &grid.positions {
            assert!(bounds.contains_point_eps(*p, 1e-12));
        }
    }

    #[test]
    fn test_rejects_small_resolutions() {
        let cyl = CylinderSurface::new();
        assert!(matches!(
            sample_surface(&cyl, GridResolution::new(1, 8)),
            Err(SorError::Config(_))
        ));
        assert!(matches!(
            sample_surface(&cyl, GridResolution::new(4, 2)),
            Err(SorError::Config(_))
        ));
        let ring = RingSurface::default();
        assert!(sample_surface(&ring, GridResolution::new(2, 8)).is_err());
        assert!(sample_surface(&ring, GridResolution::new(3, 3)).is_ok());
    }
}
