//! Append-only registry of every object's slices of the shared buffers.
//!
//! Construction order is fixed: cylinder body, ring body, cylinder normal
//! lines, ring normal lines. Triangle indices therefore precede all line
//! indices, and the registry is frozen once built.

use sor_core::{Result, SorError, Validate};
use sor_geometry::{CylinderSurface, GridResolution, ParamAxis, RingSurface};
use sor_math::Aabb3;

use crate::buffers::{GeometryBuffers, IndexRange, VertexRange};
use crate::builder::{build_cylinder, build_ring};
use crate::normal_lines::append_normal_lines;

/// The renderable objects of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Cylinder,
    Ring,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Cylinder, ObjectKind::Ring];

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Cylinder => "cylinder",
            ObjectKind::Ring => "ring",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for building the shared geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySpec {
    pub cylinder_resolution: GridResolution,
    pub cylinder_normal_length: f64,
    pub ring: RingSurface,
    pub ring_resolution: GridResolution,
    pub ring_normal_length: f64,
}

impl Default for GeometrySpec {
    fn default() -> Self {
        Self {
            cylinder_resolution: GridResolution::new(25, 25),
            cylinder_normal_length: 0.1,
            ring: RingSurface::default(),
            ring_resolution: GridResolution::new(25, 35),
            ring_normal_length: 0.02,
        }
    }
}

impl Validate for GeometrySpec {
    fn validate(&self) -> Result<()> {
        self.cylinder_resolution
            .validate_for(ParamAxis::Span { start: 1.0, end: -1.0 })?;
        self.ring_resolution.validate_for(ParamAxis::Periodic)?;
        self.ring.validate()?;
        for (name, length) in [
            ("cylinder", self.cylinder_normal_length),
            ("ring", self.ring_normal_length),
        ] {
            if !(length.is_finite() && length > 0.0) {
                return Err(SorError::config(format!(
                    "{} normal line length must be positive, got {}",
                    name, length
                )));
            }
        }
        let (vertices, indices) = self.buffer_sizes().ok_or_else(|| {
            SorError::config("geometry size overflows the address space".to_string())
        })?;
        if u32::try_from(vertices).is_err() || u32::try_from(indices).is_err() {
            return Err(SorError::config(format!(
                "{} vertices and {} indices overflow 32-bit indices",
                vertices, indices
            )));
        }
        Ok(())
    }
}

impl GeometrySpec {
    /// Total `(vertices, indices)` the shared buffers will hold once built.
    pub fn buffer_sizes(&self) -> Option<(usize, usize)> {
        let cyl = self.cylinder_resolution;
        let ring = self.ring_resolution;
        let cyl_vertices = cyl.rows.checked_mul(cyl.cols)?.checked_add(2)?;
        let ring_vertices = ring.rows.checked_mul(ring.cols)?;
        let body_vertices = cyl_vertices.checked_add(ring_vertices)?;

        // Cylinder quads between rows plus two fans; the ring also closes its last row.
        let cyl_indices = cyl.rows.checked_mul(cyl.cols)?.checked_mul(6)?;
        let ring_indices = ring_vertices.checked_mul(6)?;
        let line_indices = body_vertices.checked_mul(2)?;

        let vertices = body_vertices.checked_mul(2)?;
        let indices = cyl_indices
            .checked_add(ring_indices)?
            .checked_add(line_indices)?;
        Some((vertices, indices))
    }
}

/// Fail when sampled positions leave the analytic object-local box.
fn check_bounds(
    buffers: &GeometryBuffers,
    kind: ObjectKind,
    vertices: VertexRange,
    bounds: &Aabb3,
) -> Result<()> {
    let measured = buffers
        .bounding_box(vertices)
        .ok_or_else(|| SorError::Geometry(format!("{} has no vertices", kind)))?;
    if bounds.contains_point_eps(measured.min, BOUNDS_EPS)
        && bounds.contains_point_eps(measured.max, BOUNDS_EPS)
    {
        Ok(())
    } else {
        Err(SorError::Geometry(format!(
            "{} vertices span {:?} .. {:?}, outside {:?} .. {:?}",
            kind, measured.min, measured.max, bounds.min, bounds.max
        )))
    }
}

const BOUNDS_EPS: f64 = 1e-9;

/// One object's slices of the shared buffers and its object-local bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceEntry {
    pub kind: ObjectKind,
    pub resolution: GridResolution,
    pub vertices: VertexRange,
    pub body: IndexRange,
    pub normal_lines: IndexRange,
    pub bounds: Aabb3,
}

#[derive(Debug, Clone)]
pub struct GeometryRegistry {
    buffers: GeometryBuffers,
    cylinder: SurfaceEntry,
    ring: SurfaceEntry,
    ring_surface: RingSurface,
}

impl GeometryRegistry {
    pub fn build(spec: &GeometrySpec) -> Result<Self> {
        spec.validate()?;
        let mut buffers = GeometryBuffers::new();

        let cylinder = build_cylinder(&mut buffers, &CylinderSurface::new(), spec.cylinder_resolution)?;
        let ring = build_ring(&mut buffers, &spec.ring, spec.ring_resolution)?;
        check_bounds(&buffers, ObjectKind::Cylinder, cylinder.vertices, &cylinder.bounds)?;
        check_bounds(&buffers, ObjectKind::Ring, ring.vertices, &ring.bounds)?;
        let cylinder_lines = append_normal_lines(&mut buffers, cylinder.vertices, spec.cylinder_normal_length)?;
        let ring_lines = append_normal_lines(&mut buffers, ring.vertices, spec.ring_normal_length)?;

        let registry = Self {
            buffers,
            cylinder: SurfaceEntry {
                kind: ObjectKind::Cylinder,
                resolution: cylinder.resolution,
                vertices: cylinder.vertices,
                body: cylinder.body,
                normal_lines: cylinder_lines,
                bounds: cylinder.bounds,
            },
            ring: SurfaceEntry {
                kind: ObjectKind::Ring,
                resolution: ring.resolution,
                vertices: ring.vertices,
                body: ring.body,
                normal_lines: ring_lines,
                bounds: ring.bounds,
            },
            ring_surface: spec.ring,
        };

        log::info!(
            "built geometry: {} vertices, {} indices",
            registry.buffers.vertex_count(),
            registry.buffers.index_count()
        );
        for entry in registry.entries() {
            log::info!(
                "{} min-max box: {:?} .. {:?} ({} vertices, {} body indices, {} line indices)",
                entry.kind,
                entry.bounds.min,
                entry.bounds.max,
                entry.vertices.count,
                entry.body.count,
                entry.normal_lines.count
            );
        }

        Ok(registry)
    }

    pub fn buffers(&self) -> &GeometryBuffers {
        &self.buffers
    }

    pub fn entry(&self, kind: ObjectKind) -> &SurfaceEntry {
        match kind {
            ObjectKind::Cylinder => &self.cylinder,
            ObjectKind::Ring => &self.ring,
        }
    }

    /// Entries in construction order.
    pub fn entries(&self) -> [&SurfaceEntry; 2] {
        [&self.cylinder, &self.ring]
    }

    /// Dimensions the ring body was built with.
    pub fn ring_surface(&self) -> &RingSurface {
        &self.ring_surface
    }
}
