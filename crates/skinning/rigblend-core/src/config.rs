//! Core configuration for rigblend-core.

use serde::{Deserialize, Serialize};

/// Numeric tolerances for the blend pass.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Pairwise distances at or below this count as coincident geometry.
    pub distance_epsilon: f64,
    /// Row sums at or below this (in absolute value) count as degenerate
    /// and abort renormalization.
    pub weight_epsilon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distance_epsilon: 0.0,
            weight_epsilon: 1e-12,
        }
    }
}
