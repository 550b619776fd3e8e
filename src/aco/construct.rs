//! Tour construction for a single ant.
//!
//! [`construct_tour`] only reads the pheromone field and distance matrix,
//! and draws from the random source it is handed. Many ants can therefore
//! build tours concurrently over the same snapshot.

use super::pheromone::PheromoneMatrix;
use super::types::{DistanceMatrix, Edge, Tour};
use crate::error::{AcoError, Result};
use rand::Rng;
use tracing::trace;

/// Exponents of the move-selection rule
/// `tau^alpha * (1 / d)^beta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveWeights {
    /// Weight of trail strength.
    pub alpha: f64,
    /// Weight of proximity.
    pub beta: f64,
}

impl MoveWeights {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Unnormalized desirability of an arc with trail `tau` and length `d`.
    #[inline]
    pub fn weight(&self, tau: f64, d: f64) -> f64 {
        tau.powf(self.alpha) * (1.0 / d).powf(self.beta)
    }
}

/// Builds one closed tour rooted at `start`.
///
/// At each step the next node is sampled from the unvisited nodes with
/// probability proportional to [`MoveWeights::weight`]. Arcs whose weight
/// overflows to `+inf` (near-zero length) are taken before any other; ties
/// among them are broken uniformly. When every weight is zero the next node
/// is drawn uniformly from the unvisited ones, so construction always
/// completes.
///
/// # Errors
///
/// - [`AcoError::ShapeMismatch`] if the matrices differ in size
/// - [`AcoError::StartNodeOutOfRange`] if `start` is not a node
pub fn construct_tour<R: Rng>(
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    weights: MoveWeights,
    start: usize,
    rng: &mut R,
) -> Result<Tour> {
    let n = distances.len();
    if pheromone.len() != n {
        return Err(AcoError::ShapeMismatch {
            distances: n,
            pheromone: pheromone.len(),
        });
    }
    if n < 2 {
        return Err(AcoError::TooFewNodes(n));
    }
    if start >= n {
        return Err(AcoError::StartNodeOutOfRange { start, n });
    }

    let mut unvisited: Vec<usize> = (0..n).filter(|&j| j != start).collect();
    let mut scratch = Vec::with_capacity(unvisited.len());
    let mut edges = Vec::with_capacity(n);
    let mut current = start;

    while !unvisited.is_empty() {
        let slot = pick_move(
            pheromone.row(current),
            distances.row(current),
            &unvisited,
            weights,
            &mut scratch,
            rng,
        );
        // Order of the remaining candidates is irrelevant to the weights.
        let next = unvisited.swap_remove(slot);
        edges.push(Edge::new(current, next));
        current = next;
    }
    edges.push(Edge::new(current, start));

    Ok(Tour::from_edges(edges))
}

/// Chooses an index into `candidates` (non-empty).
fn pick_move<R: Rng>(
    tau_row: &[f64],
    dist_row: &[f64],
    candidates: &[usize],
    weights: MoveWeights,
    scratch: &mut Vec<f64>,
    rng: &mut R,
) -> usize {
    scratch.clear();
    scratch.extend(
        candidates
            .iter()
            .map(|&j| weights.weight(tau_row[j], dist_row[j])),
    );

    let preferred = scratch.iter().filter(|&&w| w == f64::INFINITY).count();
    if preferred > 0 {
        let pick = rng.random_range(0..preferred);
        return scratch
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == f64::INFINITY)
            .nth(pick)
            .map_or(0, |(i, _)| i);
    }

    let mut total: f64 = scratch.iter().sum();
    if total == f64::INFINITY {
        // Finite weights whose sum overflows: rescale by the largest.
        let max = scratch.iter().copied().fold(0.0, f64::max);
        for w in scratch.iter_mut() {
            *w /= max;
        }
        total = scratch.iter().sum();
    }
    if !(total.is_finite() && total > 0.0) {
        trace!(total, candidates = candidates.len(), "degenerate row, uniform move");
        return rng.random_range(0..candidates.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in scratch.iter().enumerate() {
        if w > 0.0 {
            cumulative += w;
            last_positive = i;
            if cumulative > threshold {
                return i;
            }
        }
    }
    // Rounding left the threshold just past the final sum.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square() -> DistanceMatrix {
        let s = 2f64.sqrt();
        DistanceMatrix::new(vec![
            vec![0.0, 1.0, s, 1.0],
            vec![1.0, 0.0, 1.0, s],
            vec![s, 1.0, 0.0, 1.0],
            vec![1.0, s, 1.0, 0.0],
        ])
        .unwrap()
    }

    fn ring(n: usize) -> DistanceMatrix {
        DistanceMatrix::from_fn(n, |i, j| {
            let d = (i as f64 - j as f64).abs();
            d.min(n as f64 - d)
        })
        .unwrap()
    }

    #[test]
    fn test_tour_is_hamiltonian() {
        let d = ring(9);
        let tau = PheromoneMatrix::initialize(9);
        let mut rng = StdRng::seed_from_u64(7);
        for start in 0..9 {
            let tour = construct_tour(&d, &tau, MoveWeights::new(1.0, 2.0), start, &mut rng).unwrap();
            assert!(tour.is_hamiltonian(9), "{tour:?}");
            assert_eq!(tour.start(), Some(start));
            assert_eq!(tour.edges().last().unwrap().to, start);
        }
    }

    #[test]
    fn test_two_nodes() {
        let d = DistanceMatrix::new(vec![vec![0.0, 3.0], vec![2.0, 0.0]]).unwrap();
        let tau = PheromoneMatrix::initialize(2);
        let mut rng = StdRng::seed_from_u64(1);
        let tour = construct_tour(&d, &tau, MoveWeights::new(1.0, 1.0), 1, &mut rng).unwrap();
        assert_eq!(tour.edges(), &[Edge::new(1, 0), Edge::new(0, 1)]);
        assert!((d.tour_distance(&tour) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_row_falls_back_to_uniform() {
        // Zero trail everywhere and arcs too long to carry any desirability.
        let d = DistanceMatrix::from_fn(6, |_, _| 1e200).unwrap();
        let tau = PheromoneMatrix::uniform(6, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let tour = construct_tour(&d, &tau, MoveWeights::new(1.0, 2.0), 0, &mut rng).unwrap();
        assert!(tour.is_hamiltonian(6));
    }

    #[test]
    fn test_underflowing_weights_still_complete() {
        let d = DistanceMatrix::from_fn(5, |_, _| 1e200).unwrap();
        let tau = PheromoneMatrix::uniform(5, 1e-300);
        let mut rng = StdRng::seed_from_u64(11);
        let tour = construct_tour(&d, &tau, MoveWeights::new(2.0, 2.0), 2, &mut rng).unwrap();
        assert!(tour.is_hamiltonian(5));
    }

    #[test]
    fn test_near_zero_arc_always_taken() {
        // (1 / 1e-200)^2 overflows to +inf.
        let d = DistanceMatrix::from_fn(4, |i, j| if (i, j) == (0, 1) { 1e-200 } else { 1.0 }).unwrap();
        let tau = PheromoneMatrix::initialize(4);
        let weights = MoveWeights::new(1.0, 2.0);

        for seed in 0..300 {
            let tour = construct_tour(&d, &tau, weights, 0, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(tour.edges()[0], Edge::new(0, 1), "seed {seed}");
            assert!(tour.is_hamiltonian(4));
        }
    }

    #[test]
    fn test_overflowing_total_keeps_proportions() {
        // Each weight is finite but their sum is not.
        let d = DistanceMatrix::from_fn(4, |_, _| 1.0).unwrap();
        let mut tau = PheromoneMatrix::uniform(4, 1e308);
        tau.set(0, 3, 1e-300);
        let mut rng = StdRng::seed_from_u64(4);
        let mut first = [0usize; 4];
        for _ in 0..200 {
            let tour = construct_tour(&d, &tau, MoveWeights::new(1.0, 1.0), 0, &mut rng).unwrap();
            first[tour.edges()[0].to] += 1;
        }
        assert_eq!(first[3], 0);
        assert!(first[1] > 0 && first[2] > 0, "{first:?}");
    }

    #[test]
    fn test_alpha_zero_ignores_pheromone() {
        let d = ring(8);
        let uniform = PheromoneMatrix::initialize(8);
        let mut skewed = PheromoneMatrix::uniform(8, 1e-3);
        skewed.set(0, 5, 50.0);
        skewed.set(3, 1, 0.0);
        let weights = MoveWeights::new(0.0, 2.0);

        for seed in 0..20 {
            let a = construct_tour(&d, &uniform, weights, 0, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = construct_tour(&d, &skewed, weights, 0, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a, b, "seed {seed}");
        }
    }

    #[test]
    fn test_beta_zero_ignores_distance() {
        let tau = PheromoneMatrix::initialize(6);
        let near = ring(6);
        let far = DistanceMatrix::from_fn(6, |i, j| 1.0 + ((i * 7 + j * 3) % 11) as f64).unwrap();
        let weights = MoveWeights::new(1.0, 0.0);

        for seed in 0..20 {
            let a = construct_tour(&near, &tau, weights, 0, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = construct_tour(&far, &tau, weights, 0, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a, b, "seed {seed}");
        }
    }

    #[test]
    fn test_strong_trail_dominates() {
        let d = square();
        let mut tau = PheromoneMatrix::uniform(4, 1e-9);
        // Trail along 0 -> 2 -> 1 -> 3 -> 0.
        tau.set(0, 2, 1.0);
        tau.set(2, 1, 1.0);
        tau.set(1, 3, 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let tour = construct_tour(&d, &tau, MoveWeights::new(1.0, 0.0), 0, &mut rng).unwrap();
        assert_eq!(tour.nodes(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let d = square();
        let mut rng = StdRng::seed_from_u64(0);
        let w = MoveWeights::new(1.0, 1.0);

        let err = construct_tour(&d, &PheromoneMatrix::initialize(3), w, 0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            AcoError::ShapeMismatch {
                distances: 4,
                pheromone: 3
            }
        );

        let err = construct_tour(&d, &PheromoneMatrix::initialize(4), w, 4, &mut rng).unwrap_err();
        assert_eq!(err, AcoError::StartNodeOutOfRange { start: 4, n: 4 });
    }
}
