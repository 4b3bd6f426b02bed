//! Surface-of-revolution geometry: parametric surfaces and grid sampling.

pub mod surface;
pub mod tessellate;

pub use surface::{CylinderSurface, ParamAxis, RevolutionSurface, RingSurface};
pub use tessellate::{grid_triangles, sample_surface, GridResolution, SurfaceGrid};
