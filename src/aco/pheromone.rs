//! Pheromone field: the only state carried between generations.

use super::types::{DistanceMatrix, Tour};

/// Trail intensities over all arcs, same shape as the distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Uniform field of `1 / n` on every arc.
    pub fn initialize(n: usize) -> Self {
        let value = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self::uniform(n, value)
    }

    /// Field with every arc set to `value`.
    pub fn uniform(n: usize, value: f64) -> Self {
        Self {
            n,
            data: vec![value; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.n + to] = value;
    }

    /// Trail intensities leaving `node`.
    pub fn row(&self, node: usize) -> &[f64] {
        &self.data[node * self.n..(node + 1) * self.n]
    }

    /// Deposits `1 / distance` on every edge of `tour`.
    ///
    /// The deposit depends on the edge length only, not the tour total.
    /// Repeated calls accumulate.
    pub fn reinforce(&mut self, tour: &Tour, distances: &DistanceMatrix) {
        for &edge in tour.edges() {
            let idx = edge.from * self.n + edge.to;
            self.data[idx] += 1.0 / distances.edge(edge);
        }
    }

    /// Scales every arc by `decay_rate`.
    pub fn evaporate(&mut self, decay_rate: f64) {
        for value in &mut self.data {
            *value *= decay_rate;
        }
    }
}
