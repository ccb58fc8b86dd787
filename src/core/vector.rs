//! 2D vector helpers shared by the particle, container and physics modules.

use nalgebra::Vector2;

/// Spatial dimension of the simulation.
pub const DIM: usize = 2;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// 2D vector of `f64` used for positions, velocities and accelerations.
pub type Vec2 = Vector2<f64>;

/// Euclidean length of `v`.
#[inline]
pub fn magnitude(v: &Vec2) -> f64 {
    v.norm()
}

/// Convert cartesian `(x, y)` to polar `(rho, phi)`, with `phi` in `(-π, π]`.
#[inline]
pub fn cartesian_to_polar(v: &Vec2) -> (f64, f64) {
    (v.norm(), v.y.atan2(v.x))
}

/// Convert polar `(rho, phi)` to cartesian `(x, y)`.
#[inline]
pub fn polar_to_cartesian(rho: f64, phi: f64) -> Vec2 {
    Vec2::new(rho * phi.cos(), rho * phi.sin())
}

#[inline]
pub(crate) fn is_finite(v: &Vec2) -> bool {
    v.iter().all(|c| c.is_finite())
}
