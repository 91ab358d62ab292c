//! Search environments.
//!
//! The MCTS engine consumes any type implementing [`Environment`]. The crate
//! ships one implementation, [`ScheduleEnv`]: a precedence-tracking,
//! multi-agent scheduling state machine that fast-forwards simulated time
//! whenever no idle agent can take an available task.
//!
//! # Contract
//!
//! | Operation | Meaning |
//! |-----------|---------|
//! | `available_actions` | Legal decisions, insertion ordered |
//! | `apply` | Commit one decision, then settle the state |
//! | `is_terminal` | Nothing left to do |
//! | `cost` | Value to minimize (elapsed ticks for schedules) |
//! | `clone` | Independent deep copy for one playout |

mod state;
mod turn;

use std::fmt::Debug;

use rand::Rng;

use crate::error::Result;

pub use state::ScheduleEnv;
pub use turn::{actor_view, candidate_pool, choose_actor, fit, FitMarker};

/// A mutable decision process the search can explore by cloning.
///
/// Clones must be structurally independent: applying actions to a clone
/// never changes the original.
pub trait Environment: Clone {
    /// A single decision.
    type Action: Copy + Eq + Debug;

    /// Currently legal actions, in insertion order.
    fn available_actions(&self) -> &[Self::Action];

    /// Applies `action`.
    ///
    /// `rng` feeds every random choice the environment makes while settling
    /// (e.g. which agent decides next).
    ///
    /// # Errors
    /// Fails if `action` is not currently legal or the environment cannot
    /// make further progress.
    fn apply<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R) -> Result<()>;

    /// Whether the process has finished.
    fn is_terminal(&self) -> bool;

    /// Cost accrued so far. Lower is better.
    fn cost(&self) -> f64;
}
