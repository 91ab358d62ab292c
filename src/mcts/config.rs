//! Search parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Rollout step ceiling used when none is configured.
pub const DEFAULT_ROLLOUT_LIMIT: usize = 1000;

/// MCTS configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Exploration constant `c` in `Q + c·P·sqrt(N_parent)/(1 + N)`.
    pub c_puct: f64,

    /// Playouts per decision.
    pub playouts: usize,

    /// Maximum actions applied during one rollout. Reaching it is logged
    /// and the rollout returns the cost accrued so far.
    pub rollout_limit: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            c_puct: 10.0,
            playouts: 10,
            rollout_limit: DEFAULT_ROLLOUT_LIMIT,
        }
    }
}

impl MctsConfig {
    /// Default config with the given playout budget.
    pub fn with_playouts(playouts: usize) -> Self {
        Self {
            playouts,
            ..Default::default()
        }
    }

    pub fn with_c_puct(mut self, c_puct: f64) -> Self {
        self.c_puct = c_puct;
        self
    }

    pub fn with_rollout_limit(mut self, rollout_limit: usize) -> Self {
        self.rollout_limit = rollout_limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.c_puct.is_finite() || self.c_puct < 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "c_puct must be a finite non-negative number, got {}",
                self.c_puct
            )));
        }
        if self.playouts == 0 {
            return Err(ScheduleError::InvalidConfig("playouts must be >= 1".into()));
        }
        if self.rollout_limit == 0 {
            return Err(ScheduleError::InvalidConfig(
                "rollout_limit must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
