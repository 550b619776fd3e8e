//! Graph and tour types for the colony.
//!
//! [`DistanceMatrix`] is the read-only input; [`Edge`], [`Tour`] and
//! [`Candidate`] are what the ants produce.

use crate::error::{AcoError, Result};

/// Directed arc between two nodes, used as an index into the
/// distance and pheromone matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Square matrix of edge costs.
///
/// Off-diagonal entries are finite and strictly positive. The diagonal is
/// always `+inf`, so self-loops are never chosen.
/// Asymmetric costs are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from rows, validating its shape and values.
    ///
    /// Whatever is on the diagonal is replaced by `+inf`.
    ///
    /// # Errors
    ///
    /// - [`AcoError::TooFewNodes`] for fewer than 2 rows
    /// - [`AcoError::NotSquare`] when a row length differs from the row count
    /// - [`AcoError::InvalidDistance`] for a zero, negative or non-finite
    ///   distance between distinct nodes
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n < 2 {
            return Err(AcoError::TooFewNodes(n));
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(AcoError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, value) in row.into_iter().enumerate() {
                if i == j {
                    data.push(f64::INFINITY);
                    continue;
                }
                if !value.is_finite() || value <= 0.0 {
                    return Err(AcoError::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
                data.push(value);
            }
        }

        Ok(Self { n, data })
    }

    /// Builds an `n`×`n` matrix from a cost function over distinct pairs.
    pub fn from_fn<F>(n: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { f64::INFINITY } else { f(i, j) })
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`; a valid matrix has at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of the arc `from -> to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    #[inline]
    pub fn edge(&self, edge: Edge) -> f64 {
        self.get(edge.from, edge.to)
    }

    /// Outgoing costs of `node`.
    pub fn row(&self, node: usize) -> &[f64] {
        &self.data[node * self.n..(node + 1) * self.n]
    }

    /// Sum of arc costs along `tour`.
    pub fn tour_distance(&self, tour: &Tour) -> f64 {
        tour.edges().iter().map(|&e| self.edge(e)).sum()
    }
}

/// Closed walk rooted at a start node.
///
/// For `n` nodes a complete tour holds `n` edges: `n - 1` moves through
/// the unvisited nodes and one closing edge back to the start.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    edges: Vec<Edge>,
}

impl Tour {
    pub(crate) fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The node the tour starts from and returns to.
    pub fn start(&self) -> Option<usize> {
        self.edges.first().map(|e| e.from)
    }

    /// Nodes in visiting order, start first, without the closing return.
    pub fn nodes(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.from).collect()
    }

    /// Checks that this is a Hamiltonian cycle over `n` nodes.
    ///
    /// Edges must chain head to tail, the last edge must return to the
    /// start, and every node must be entered exactly once.
    pub fn is_hamiltonian(&self, n: usize) -> bool {
        if self.edges.len() != n || n == 0 {
            return false;
        }
        let chained = self.edges.windows(2).all(|w| w[0].to == w[1].from);
        let closed = self.edges.last().map(|e| e.to) == self.start();
        if !chained || !closed {
            return false;
        }

        let mut entered = vec![false; n];
        for edge in &self.edges {
            if edge.to >= n || entered[edge.to] {
                return false;
            }
            entered[edge.to] = true;
        }
        true
    }
}

/// A scored tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub tour: Tour,
    /// Total distance along `tour`.
    pub distance: f64,
}

impl Candidate {
    /// Scores `tour` against `distances`.
    pub fn score(tour: Tour, distances: &DistanceMatrix) -> Self {
        let distance = distances.tour_distance(&tour);
        Self { tour, distance }
    }
}
