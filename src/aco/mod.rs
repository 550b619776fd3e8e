//! Ant Colony Optimization (ACO) for closed tours.
//!
//! A colony of simulated ants repeatedly builds Hamiltonian cycles over a
//! distance matrix. Each move is sampled with probability proportional to
//! `tau^alpha * (1/d)^beta`, where `tau` is the pheromone left on the arc by
//! earlier generations. After every generation the best `n_best` tours
//! reinforce their arcs by `1/d` and the whole field decays by `decay_rate`.
//!
//! # Key Types
//!
//! - [`DistanceMatrix`]: validated, read-only edge costs
//! - [`PheromoneMatrix`]: trail field carried between generations
//! - [`construct_tour`]: one ant's tour from a pheromone snapshot
//! - [`AcoRunner`]: the generation loop, returning an [`AcoResult`]
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod construct;
mod pheromone;
mod runner;
mod types;

pub use config::AcoConfig;
pub use construct::{construct_tour, MoveWeights};
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AcoRunner, GenerationStats};
pub use types::{Candidate, DistanceMatrix, Edge, Tour};
