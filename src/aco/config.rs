//! ACO configuration.

use crate::error::{AcoError, Result};

/// Configuration for the Ant Colony Optimizer.
///
/// # Examples
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::for_ants(20)
///     .with_iterations(30)
///     .with_decay_rate(0.5)
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_seed(42);
/// assert_eq!(config.n_best, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants (tours) constructed per generation.
    pub n_ants: usize,

    /// Number of best tours per generation that deposit pheromone.
    ///
    /// Must be in `1..=n_ants`.
    pub n_best: usize,

    /// Number of generations.
    pub n_iterations: usize,

    /// Multiplicative pheromone decay per generation, in (0, 1).
    ///
    /// Lower values forget faster.
    pub decay_rate: f64,

    /// Exponent on pheromone strength. `0.0` ignores trails.
    pub alpha: f64,

    /// Exponent on proximity (`1 / distance`). `0.0` ignores distance.
    pub beta: f64,

    /// Node every tour starts from and returns to.
    pub start_node: usize,

    /// Whether the decayed pheromone field is kept for the next generation.
    ///
    /// `false` reproduces a colony where evaporation is computed but
    /// discarded, so reinforcement accumulates without decay.
    pub evaporation: bool,

    /// Construct tours on the rayon pool (requires the `parallel` feature).
    ///
    /// Results for a fixed seed are identical either way.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked between generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 30,
            n_best: 6,
            n_iterations: 50,
            decay_rate: 0.5,
            alpha: 1.0,
            beta: 2.0,
            start_node: 0,
            evaporation: true,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl AcoConfig {
    /// Default configuration with `n_ants` ants, the best fifth of which
    /// reinforce the trail each generation.
    pub fn for_ants(n_ants: usize) -> Self {
        Self {
            n_ants,
            n_best: (n_ants / 5).max(1),
            ..Self::default()
        }
    }

    /// Sets the number of ants.
    pub fn with_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the number of reinforcing tours per generation.
    pub fn with_best(mut self, n: usize) -> Self {
        self.n_best = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    /// Sets the per-generation pheromone decay factor.
    pub fn with_decay_rate(mut self, rate: f64) -> Self {
        self.decay_rate = rate;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the proximity exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the node every tour starts from and returns to.
    pub fn with_start_node(mut self, node: usize) -> Self {
        self.start_node = node;
        self
    }

    /// Enables or disables retention of the evaporated field.
    pub fn with_evaporation(mut self, enabled: bool) -> Self {
        self.evaporation = enabled;
        self
    }

    /// Enables or disables parallel tour construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// `start_node` is checked against the graph by the runner, since the
    /// node count is not known here.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants == 0 {
            return Err(AcoError::config("n_ants", "must be positive"));
        }
        if self.n_best == 0 {
            return Err(AcoError::config("n_best", "must be positive"));
        }
        if self.n_best > self.n_ants {
            return Err(AcoError::config(
                "n_best",
                format!("must not exceed n_ants ({}), got {}", self.n_ants, self.n_best),
            ));
        }
        if self.n_iterations == 0 {
            return Err(AcoError::config("n_iterations", "must be positive"));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate < 1.0) {
            return Err(AcoError::config(
                "decay_rate",
                format!("must be in (0, 1), got {}", self.decay_rate),
            ));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(AcoError::config(
                "alpha",
                format!("must be a non-negative number, got {}", self.alpha),
            ));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(AcoError::config(
                "beta",
                format!("must be a non-negative number, got {}", self.beta),
            ));
        }
        Ok(())
    }
}
