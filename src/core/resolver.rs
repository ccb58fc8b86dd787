//! Elastic collision response between two particles.

use crate::core::particle::Particle;
use crate::error::{Error, Result};

/// Small numeric tolerance for relative motion checks.
const EPS_REL_SPEED: f64 = 1e-12;

/// Resolve an elastic collision between `p1` and `p2` of arbitrary masses.
///
/// ```text
/// v1' = v1 - 2*m2/(m1+m2) * <v1-v2, x1-x2> / |x1-x2|² * (x1-x2)
/// v2' = v2 - 2*m1/(m1+m2) * <v2-v1, x2-x1> / |x2-x1|² * (x2-x1)
/// ```
///
/// Only velocities change; overlapping particles stay where they are.
///
/// Errors: `Error::DegenerateCollision` if the centers coincide. Neither particle is
/// modified in that case.
pub fn resolve(p1: &mut Particle, p2: &mut Particle) -> Result<()> {
    let d = p1.position - p2.position;
    let dist_sq = d.norm_squared();
    if dist_sq <= 0.0 {
        return Err(Error::DegenerateCollision {
            x: p1.position.x,
            y: p1.position.y,
        });
    }

    let (m1, m2) = (p1.mass, p2.mass);
    let u = p1.velocity - p2.velocity;
    let f1 = (2.0 * m2 / (m1 + m2)) * u.dot(&d) / dist_sq;
    let f2 = (2.0 * m1 / (m1 + m2)) * (-u).dot(&(-d)) / dist_sq;

    p1.velocity -= d * f1;
    p2.velocity -= (-d) * f2;
    Ok(())
}

/// Resolve a collision at the reconstructed moment of contact.
///
/// Both particles are assumed to have moved in straight lines since they touched.
/// The time since contact `tau` solves `|dx - du*tau| = r1 + r2` with `dx = x1 - x2`
/// and `du = v1 - v2`. The pair is rewound to contact, [`resolve`] is applied there,
/// and both particles travel `tau` forward with their new velocities.
///
/// Returns the contact instant as an offset within the step (`dt - tau`). Without
/// relative motion, for a pair already moving apart, or when contact predates the
/// step, the collision is resolved in place and `dt` is returned.
pub fn resolve_continuous(p1: &mut Particle, p2: &mut Particle, dt: f64) -> Result<f64> {
    let Some(tau) = time_since_contact(p1, p2, dt) else {
        resolve(p1, p2)?;
        return Ok(dt);
    };

    let (x1, x2) = (p1.position, p2.position);
    p1.position -= p1.velocity * tau;
    p2.position -= p2.velocity * tau;
    if let Err(e) = resolve(p1, p2) {
        p1.position = x1;
        p2.position = x2;
        return Err(e);
    }
    p1.position += p1.velocity * tau;
    p2.position += p2.velocity * tau;
    Ok(dt - tau)
}

/// Positive root of `|dx - du*t|² = (r1 + r2)²` if the pair is approaching and the
/// root lies in `(0, dt]`.
fn time_since_contact(p1: &Particle, p2: &Particle, dt: f64) -> Option<f64> {
    let dx = p1.position - p2.position;
    let du = p1.velocity - p2.velocity;
    let a = du.norm_squared();
    if a <= EPS_REL_SPEED {
        return None; // No relative motion
    }
    let approach = dx.dot(&du);
    if approach >= 0.0 {
        return None; // Separating
    }
    let b = -2.0 * approach;
    let r_sum = p1.radius + p2.radius;
    let c = dx.norm_squared() - r_sum * r_sum;

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let tau = (-b + disc.sqrt()) / (2.0 * a);
    if !tau.is_finite() || tau <= 0.0 || tau > dt {
        return None;
    }
    Some(tau)
}

/// Mutable references to two distinct elements of `particles`, in argument order.
///
/// Errors: `Error::InvalidParameter` if `i == j` or either index is out of range.
pub(crate) fn pair_mut(
    particles: &mut [Particle],
    i: usize,
    j: usize,
) -> Result<(&mut Particle, &mut Particle)> {
    let n = particles.len();
    if i == j || i >= n || j >= n {
        return Err(Error::InvalidParameter(format!(
            "invalid particle pair ({i}, {j}) for {n} particles"
        )));
    }
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        Ok((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = particles.split_at_mut(i);
        Ok((&mut tail[0], &mut head[j]))
    }
}
