//! Playouts, move readout and tree reuse.
//!
//! Each playout clones the real environment and runs
//! **select → expand → rollout → backpropagate** against the shared tree.
//! The rollout result is the environment's cost; the value folded into
//! the tree is its negation, so the PUCT maximization prefers cheaper
//! outcomes. Every ancestor receives the same value (single objective, no
//! alternating players).

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::{MctsConfig, NodeId, Tree};
use crate::env::Environment;
use crate::error::{Result, ScheduleError};

/// Monte Carlo Tree Search over an [`Environment`].
pub struct Mcts<E: Environment, R> {
    config: MctsConfig,
    tree: Tree<E::Action>,
    rng: R,
}

impl<E: Environment, R: Clone> Clone for Mcts<E, R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            tree: self.tree.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<E: Environment, R: Rng> Mcts<E, R> {
    pub fn new(config: MctsConfig, rng: R) -> Self {
        Self {
            config,
            tree: Tree::new(),
            rng,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree<E::Action> {
        &self.tree
    }

    /// Runs the playout budget against clones of `env` and returns the most
    /// visited root action that is legal in `env`.
    ///
    /// # Errors
    /// [`ScheduleError::NoLegalActions`] if `env` offers nothing to choose;
    /// environment errors raised during a playout are propagated.
    pub fn get_move(&mut self, env: &E) -> Result<E::Action> {
        let legal = env.available_actions();
        if legal.is_empty() {
            return Err(ScheduleError::NoLegalActions);
        }

        for _ in 0..self.config.playouts {
            self.playout(env.clone())?;
        }

        let action = self
            .tree
            .most_visited(|a| legal.contains(a))
            .or_else(|| legal.first().copied())
            .ok_or(ScheduleError::NoLegalActions)?;
        debug!(
            ?action,
            root_visits = self.tree.root().visits(),
            nodes = self.tree.len(),
            "move selected"
        );
        Ok(action)
    }

    /// Advances the root after `action` was played for real.
    ///
    /// Keeps the matching subtree if the root has one, otherwise starts over.
    pub fn update_with_move(&mut self, action: E::Action) {
        let reused = self.tree.reroot(action);
        debug!(?action, reused, nodes = self.tree.len(), "tree advanced");
    }

    /// Discards the whole tree.
    pub fn reset(&mut self) {
        self.tree.reset();
    }

    /// One simulation on a disposable copy of the environment.
    ///
    /// Returns the value propagated into the tree.
    pub fn playout(&mut self, mut env: E) -> Result<f64> {
        let mut node = self.tree.root_id();

        while self.tree.get(node).has_children() && !env.is_terminal() {
            let (action, child) = self.select(node, &env)?;
            env.apply(action, &mut self.rng)?;
            node = child;
        }

        if !env.is_terminal() {
            self.tree.expand(node, env.available_actions());
        }

        let value = -self.rollout(&mut env)?;
        self.tree.backpropagate(node, value);
        Ok(value)
    }

    /// Picks the best-scoring child whose action is legal in `env`.
    ///
    /// Children recorded under an earlier state may all be illegal now; the
    /// first available action is then used, reusing or registering its node.
    fn select(&mut self, node: NodeId, env: &E) -> Result<(E::Action, NodeId)> {
        let legal = env.available_actions();
        let ranked = self.tree.ranked_children(node, self.config.c_puct);
        if let Some(&(action, child)) = ranked.iter().find(|(a, _)| legal.contains(a)) {
            return Ok((action, child));
        }

        let action = *legal.first().ok_or(ScheduleError::NoLegalActions)?;
        let child = match self.tree.child(node, action) {
            Some(child) => child,
            None => {
                let prior = 1.0 / (ranked.len() + 1) as f64;
                self.tree.add_child(node, action, prior)
            }
        };
        Ok((action, child))
    }

    /// Plays uniformly random actions until terminal or the step ceiling.
    fn rollout(&mut self, env: &mut E) -> Result<f64> {
        for _ in 0..self.config.rollout_limit {
            if env.is_terminal() {
                return Ok(env.cost());
            }
            let action = *env
                .available_actions()
                .choose(&mut self.rng)
                .ok_or(ScheduleError::NoLegalActions)?;
            env.apply(action, &mut self.rng)?;
        }

        if !env.is_terminal() {
            warn!(
                limit = self.config.rollout_limit,
                cost = env.cost(),
                "rollout hit the step ceiling"
            );
        }
        Ok(env.cost())
    }
}
