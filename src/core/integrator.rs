//! Time integration of a single particle under constant gravity, with reflection
//! off the walls of its bounding rectangle.
//!
//! Per step, in order:
//!
//! ```text
//! 1. x_prev = x
//! 2. x      = x + v*dt + 0.5*g*dt²
//! 3. reflect x, v off the walls (discrete or continuous)
//! 4. v      = v + g*dt
//! 5. E      = 0.5*m*|v|² + m*|g|*y
//! ```
//!
//! Gravity is added to the velocity only after the wall correction, so a bounce
//! never picks up the gravity increment of the step it happened in.

use crate::config::CollisionHandler;
use crate::core::container::Bounds;
use crate::core::event::{Side, WallHit};
use crate::core::particle::Particle;
use crate::core::vector::{Vec2, DIM};
use crate::error::{Error, Result};

/// Wall contacts of one particle during one step; at most one per axis.
pub type WallHits = [Option<WallHit>; DIM];

/// Advance `particle` by `dt` under `gravity`, keeping it inside `bounds`.
///
/// Errors: `Error::InvalidParameter` if `dt` is not finite and > 0. The particle is
/// left untouched in that case.
pub fn advance(
    particle: &mut Particle,
    bounds: &Bounds,
    dt: f64,
    gravity: Vec2,
    handler: CollisionHandler,
) -> Result<WallHits> {
    validate_dt(dt)?;

    particle.previous_position = particle.position;
    particle.position += particle.velocity * dt + gravity * (0.5 * dt * dt);

    let hits = match handler {
        CollisionHandler::DiscreteDetection => reflect_discrete(particle, bounds, dt),
        CollisionHandler::ContinuousDetection => reflect_continuous(particle, bounds, dt),
    };

    particle.velocity += gravity * dt;
    particle.refresh_energy(gravity.norm());
    Ok(hits)
}

/// Post-hoc wall correction: clamp each violating axis onto the wall and flip its
/// velocity component.
pub fn reflect_discrete(particle: &mut Particle, bounds: &Bounds, dt: f64) -> WallHits {
    let mut hits: WallHits = [None; DIM];
    for (k, hit) in hits.iter_mut().enumerate() {
        *hit = reflect_axis_discrete(particle, bounds, k, dt);
    }
    hits
}

/// Exact impact-time wall correction.
///
/// For a violated axis the step is treated as linear in time between the previous
/// and the current coordinate. The instant the edge touched the wall is read off
/// that line, the velocity component is flipped there and the particle travels the
/// rest of the step with the reflected velocity. Axes that moved zero distance, or
/// whose impact time falls outside `[0, dt]`, use the discrete correction instead.
pub fn reflect_continuous(particle: &mut Particle, bounds: &Bounds, dt: f64) -> WallHits {
    let mut hits: WallHits = [None; DIM];
    for (k, hit) in hits.iter_mut().enumerate() {
        *hit = reflect_axis_continuous(particle, bounds, k, dt);
    }
    hits
}

/// Clamp the position into `bounds` shrunk by the radius, leaving velocity alone.
///
/// When the region is narrower than the particle the lower wall wins.
pub fn confine(particle: &mut Particle, bounds: &Bounds) {
    for k in 0..DIM {
        let (lo, hi) = contact_range(particle.radius, bounds, k);
        particle.position[k] = particle.position[k].min(hi).max(lo);
    }
}

/// Clamp onto the violated wall and flip the axis velocity once.
///
/// In a region narrower than the particle both walls are violated; the center is
/// pinned to `lower + radius` as in [`confine`] and the lower wall is reported.
fn reflect_axis_discrete(
    particle: &mut Particle,
    bounds: &Bounds,
    k: usize,
    dt: f64,
) -> Option<WallHit> {
    let r = particle.radius;
    let x = particle.position[k];
    let side = if x - r < bounds.lower[k] {
        Side::Lower
    } else if x + r > bounds.upper[k] {
        Side::Upper
    } else {
        return None;
    };

    let (lo, hi) = contact_range(r, bounds, k);
    particle.position[k] = x.min(hi).max(lo);
    particle.velocity[k] = -particle.velocity[k];
    Some(WallHit {
        axis: k,
        side,
        time: dt,
    })
}

fn reflect_axis_continuous(
    particle: &mut Particle,
    bounds: &Bounds,
    k: usize,
    dt: f64,
) -> Option<WallHit> {
    let r = particle.radius;
    let x = particle.position[k];
    let (wall, side) = if x - r < bounds.lower[k] {
        (bounds.lower[k], Side::Lower)
    } else if x + r > bounds.upper[k] {
        (bounds.upper[k], Side::Upper)
    } else {
        return None;
    };

    let prev = particle.previous_position[k];
    let displacement = x - prev;
    if displacement == 0.0 {
        log::debug!("axis {k}: zero displacement at wall, using discrete reflection");
        return reflect_axis_discrete(particle, bounds, k, dt);
    }

    // time = slope * coordinate + intercept, with time(prev) = 0 and time(x) = dt
    let slope = dt / displacement;
    let intercept = -slope * prev;
    let contact = nearer(prev, wall - r, wall + r);
    let t_impact = slope * contact + intercept;
    if !t_impact.is_finite() || !(0.0..=dt).contains(&t_impact) {
        log::debug!(
            "axis {k}: impact time {t_impact} outside [0, {dt}], using discrete reflection"
        );
        return reflect_axis_discrete(particle, bounds, k, dt);
    }

    let impact = prev + particle.velocity[k] * t_impact;
    particle.velocity[k] = -particle.velocity[k];
    let replayed = impact + particle.velocity[k] * (dt - t_impact);
    let (lo, hi) = contact_range(r, bounds, k);
    particle.position[k] = replayed.min(hi).max(lo);

    Some(WallHit {
        axis: k,
        side,
        time: t_impact,
    })
}

/// Allowed range of the center coordinate on axis `k`.
#[inline]
fn contact_range(radius: f64, bounds: &Bounds, k: usize) -> (f64, f64) {
    (bounds.lower[k] + radius, bounds.upper[k] - radius)
}

#[inline]
fn nearer(origin: f64, a: f64, b: f64) -> f64 {
    if (a - origin).abs() <= (b - origin).abs() {
        a
    } else {
        b
    }
}

fn validate_dt(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidParameter("dt must be finite and > 0".into()));
    }
    Ok(())
}
