//! Construction-time design constants for the engine.
//!
//! The driver supplies an [`EngineConfig`] once, when the engine is
//! built; no constant is renegotiable per call.

use serde::{Deserialize, Serialize};

/// Tunable constants of the pet economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Credit granted to an egg's owner when it hatches (default: 20).
    pub hatch_reward: u64,

    /// Cumulative feed count at which a kitten becomes an adult
    /// (default: 3).
    pub growth_threshold: u64,

    /// Flat credit price of any ornament (default: 5).
    pub ornament_price: u64,

    /// Credit price per unit of any food kind (default: 2).
    pub food_price: u64,

    /// Credit granted per successful daily check-in (default: 1).
    pub check_in_reward: u64,

    /// Maximum nickname length in bytes (default: 32).
    pub nickname_max_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hatch_reward: 20,
            growth_threshold: 3,
            ornament_price: 5,
            food_price: 2,
            check_in_reward: 1,
            nickname_max_len: 32,
        }
    }
}
