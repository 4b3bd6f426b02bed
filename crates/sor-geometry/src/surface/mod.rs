//! Surfaces of revolution about the +Y axis.

mod cylinder;
mod ring;

use std::f64::consts::TAU;

use sor_core::BoundingBox;
use sor_math::{Aabb3, Point3, Vector3};

pub use cylinder::CylinderSurface;
pub use ring::RingSurface;

/// How the profile parameter `t` is sampled across grid rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamAxis {
    /// Open interval: row 0 samples `start`, the last row samples `end`.
    Span { start: f64, end: f64 },
    /// Full turn `[0, 2π)`; the last row connects back to row 0.
    Periodic,
}

impl ParamAxis {
    /// Parameter value for row `i` of `rows`.
    pub fn sample(self, i: usize, rows: usize) -> f64 {
        match self {
            ParamAxis::Span { start, end } => {
                if i + 1 >= rows {
                    end
                } else {
                    start + (end - start) * i as f64 / (rows - 1) as f64
                }
            }
            ParamAxis::Periodic => TAU * i as f64 / rows as f64,
        }
    }

    pub fn wraps(self) -> bool {
        matches!(self, ParamAxis::Periodic)
    }

    /// Fewest rows that still produce a closed, non-degenerate mesh.
    pub fn min_rows(self) -> usize {
        match self {
            ParamAxis::Span { .. } => 2,
            ParamAxis::Periodic => 3,
        }
    }
}

/// A parametric surface `S(t, θ)` swept a full turn about +Y.
///
/// `θ` always covers `[0, 2π)`; `t` follows [`RevolutionSurface::t_axis`].
/// The normal is the exact normalized cross product of the partial
/// derivatives, oriented outward.
pub trait RevolutionSurface: BoundingBox<Point = Point3> + Send + Sync {
    fn point_at(&self, t: f64, theta: f64) -> Point3;

    /// Partial derivatives `(∂S/∂t, ∂S/∂θ)`.
    fn partials(&self, t: f64, theta: f64) -> (Vector3, Vector3);

    /// Outward unit normal, or zero where the surface is degenerate.
    fn normal_at(&self, t: f64, theta: f64) -> Vector3;

    fn t_axis(&self) -> ParamAxis;

    fn local_bounds(&self) -> Aabb3 {
        let (min, max) = self.bounding_box();
        Aabb3::new(min, max)
    }
}
