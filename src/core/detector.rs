use crate::config::CollisionDetection;
use crate::core::particle::Particle;

/// Finds the particle pairs that currently overlap.
///
/// Implementations return index pairs `(i, j)` with `i < j`, each unordered pair at
/// most once, in the order the resolver should handle them.
pub trait OverlapDetector {
    fn find_overlapping_pairs(&self, particles: &[Particle]) -> Vec<(usize, usize)>;
}

/// Exhaustive O(n²) check of every unordered pair, ascending by `(i, j)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairWise;

impl OverlapDetector for PairWise {
    fn find_overlapping_pairs(&self, particles: &[Particle]) -> Vec<(usize, usize)> {
        let n = particles.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if overlaps(&particles[i], &particles[j]) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl OverlapDetector for CollisionDetection {
    fn find_overlapping_pairs(&self, particles: &[Particle]) -> Vec<(usize, usize)> {
        match self {
            CollisionDetection::PairWise => PairWise.find_overlapping_pairs(particles),
        }
    }
}

/// Whether the centers are strictly closer than the sum of the radii.
/// Touching discs do not overlap.
#[inline]
pub fn overlaps(a: &Particle, b: &Particle) -> bool {
    let r_sum = a.radius + b.radius;
    (a.position - b.position).norm_squared() < r_sum * r_sum
}
