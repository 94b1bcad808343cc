//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Configuration shared by the search agents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Depth budget in plies. Depth 0 evaluates the root's children
    /// directly without recursion.
    pub max_depth: u32,

    /// Maximizing agent only: search every depth from 1 to `max_depth`
    /// instead of the final depth alone, keeping the deepest answer.
    pub iterative_deepening: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            iterative_deepening: false,
        }
    }
}

impl SearchConfig {
    /// Create a config with the given depth budget.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable iterative deepening.
    #[must_use]
    pub fn with_iterative_deepening(mut self, enabled: bool) -> Self {
        self.iterative_deepening = enabled;
        self
    }
}
