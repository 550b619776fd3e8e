//! ACO generation loop.
//!
//! [`AcoRunner`] drives the colony: build `n_ants` tours over a read-only
//! pheromone snapshot → rank → reinforce with the best `n_best` →
//! evaporate → track the best tour ever seen.

use super::config::AcoConfig;
use super::construct::{construct_tour, MoveWeights};
use super::pheromone::PheromoneMatrix;
use super::types::{Candidate, DistanceMatrix, Tour};
use crate::error::{AcoError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of an ACO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Shortest tour found across all generations.
    pub best_tour: Tour,

    /// Total distance of `best_tour`.
    pub best_distance: f64,

    /// Best distance so far, one entry per completed generation.
    ///
    /// Non-increasing. Holds `n_iterations` entries unless `cancelled`.
    pub history: Vec<f64>,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run stopped early on the cancel flag or time limit.
    pub cancelled: bool,
}

/// Snapshot handed to the observer after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based index of the completed generation.
    pub generation: usize,
    /// Shortest tour distance built in this generation.
    pub generation_best: f64,
    /// Mean tour distance of this generation.
    pub generation_mean: f64,
    /// Best distance seen so far.
    pub best_distance: f64,
    /// Whether this generation improved the running best.
    pub improved: bool,
}

/// Executes the Ant Colony Optimizer.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner, DistanceMatrix};
///
/// let distances = DistanceMatrix::new(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.5],
///     vec![2.0, 1.5, 0.0],
/// ])?;
/// let config = AcoConfig::for_ants(10).with_iterations(20).with_seed(42);
/// let result = AcoRunner::run(&distances, &config)?;
/// assert_eq!(result.history.len(), 20);
/// assert!((result.best_distance - 4.5).abs() < 1e-9);
/// # Ok::<(), u_aco::AcoError>(())
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony for `config.n_iterations` generations.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or `start_node`
    /// is not a node of `distances`. Nothing is constructed in that case.
    pub fn run(distances: &DistanceMatrix, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_observer(distances, config, None, |_| {})
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// If the flag is set, the run stops between generations and returns
    /// the best tour found so far with `cancelled = true`.
    pub fn run_with_cancel(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        Self::run_with_observer(distances, config, cancel, |_| {})
    }

    /// Runs the colony, calling `on_generation` after every generation.
    ///
    /// # Errors
    /// Besides invalid input, returns [`AcoError::Cancelled`] or
    /// [`AcoError::TimeLimitExceeded`] when the run is stopped before its
    /// first generation completes.
    pub fn run_with_observer<F>(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut on_generation: F,
    ) -> Result<AcoResult>
    where
        F: FnMut(&GenerationStats),
    {
        config.validate()?;
        let n = distances.len();
        if config.start_node >= n {
            return Err(AcoError::StartNodeOutOfRange {
                start: config.start_node,
                n,
            });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = MoveWeights::new(config.alpha, config.beta);
        let started = Instant::now();

        debug!(
            nodes = n,
            ants = config.n_ants,
            best = config.n_best,
            iterations = config.n_iterations,
            evaporation = config.evaporation,
            seed,
            "aco run started"
        );

        let mut pheromone = PheromoneMatrix::initialize(n);
        let mut best: Option<Candidate> = None;
        let mut history = Vec::with_capacity(config.n_iterations);
        let mut stopped: Option<AcoError> = None;

        for gen in 0..config.n_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!(generation = gen, "aco run cancelled");
                    stopped = Some(AcoError::Cancelled);
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    debug!(generation = gen, limit_ms = limit, "aco time limit reached");
                    stopped = Some(AcoError::TimeLimitExceeded { limit_ms: limit });
                    break;
                }
            }

            // Per-ant streams drawn in ant order keep results independent
            // of how construction is scheduled.
            let ant_seeds: Vec<u64> = (0..config.n_ants).map(|_| rng.random()).collect();
            let mut candidates =
                construct_generation(distances, &pheromone, weights, config, &ant_seeds)?;

            // Stable sort: among equal distances the earlier ant ranks first.
            candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

            for candidate in &candidates[..config.n_best] {
                pheromone.reinforce(&candidate.tour, distances);
            }
            if config.evaporation {
                pheromone.evaporate(config.decay_rate);
            }

            let generation_mean =
                candidates.iter().map(|c| c.distance).sum::<f64>() / candidates.len() as f64;
            let generation_best = candidates[0].distance;

            let improved = best
                .as_ref()
                .is_none_or(|b| generation_best < b.distance);
            if improved {
                debug!(
                    generation = gen + 1,
                    distance = generation_best,
                    "aco new best tour"
                );
                best = Some(candidates.swap_remove(0));
            }

            let best_distance = best.as_ref().map_or(f64::INFINITY, |b| b.distance);
            history.push(best_distance);

            trace!(
                generation = gen + 1,
                generation_best,
                generation_mean,
                best_distance,
                "aco generation done"
            );
            on_generation(&GenerationStats {
                generation: gen + 1,
                generation_best,
                generation_mean,
                best_distance,
                improved,
            });
        }

        let cancelled = stopped.is_some();
        let best = best.ok_or_else(|| stopped.unwrap_or(AcoError::Cancelled))?;

        Ok(AcoResult {
            best_distance: best.distance,
            best_tour: best.tour,
            generations: history.len(),
            history,
            cancelled,
        })
    }
}

/// Builds and scores one tour per ant seed, in seed order.
fn construct_generation(
    distances: &DistanceMatrix,
    pheromone: &PheromoneMatrix,
    weights: MoveWeights,
    config: &AcoConfig,
    ant_seeds: &[u64],
) -> Result<Vec<Candidate>> {
    let build = |&seed: &u64| -> Result<Candidate> {
        let mut ant_rng = StdRng::seed_from_u64(seed);
        let tour = construct_tour(distances, pheromone, weights, config.start_node, &mut ant_rng)?;
        Ok(Candidate::score(tour, distances))
    };

    #[cfg(feature = "parallel")]
    {
        if config.parallel {
            return ant_seeds.par_iter().map(build).collect();
        }
    }

    ant_seeds.iter().map(build).collect()
}
