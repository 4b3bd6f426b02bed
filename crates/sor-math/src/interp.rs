//! Interpolation and angle helpers shared by the animation and camera code.

use std::f64::consts::TAU;
use std::ops::{Add, Mul, Sub};

/// Linear interpolation that snaps to `b` once `t >= 1`.
///
/// The snap keeps a single oversized frame delta from overshooting the end
/// value. `t` below zero is not clamped.
#[inline]
pub fn lerp<T>(a: T, b: T, t: f64) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Wrap an angle in radians into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
