//! Fitness-bearing weight vectors.
//!
//! A `WeightVector` is the opaque strategy object an external optimizer
//! evolves: a mutable vector of feature weights plus the fitness the
//! optimizer assigned to it. The engine only ever reads weights through
//! `dot`; it never tunes them.

use serde::{Deserialize, Serialize};

/// A mutable weight vector with an attached fitness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    weights: Vec<f64>,
    fitness: f64,
}

impl WeightVector {
    /// Create a weight vector with zero fitness.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            fitness: 0.0,
        }
    }

    /// A vector of `len` equal weights.
    #[must_use]
    pub fn uniform(len: usize, value: f64) -> Self {
        Self::new(vec![value; len])
    }

    /// Number of weights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Is the vector empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable access for external optimizers.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// The fitness assigned by an external optimizer.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Record a fitness value.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Weighted sum over a feature vector.
    ///
    /// Extra features beyond the vector's length contribute nothing.
    #[must_use]
    pub fn dot(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .map(|(w, f)| w * f)
            .sum()
    }

    /// Compact snapshot for exchange with an external optimizer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
