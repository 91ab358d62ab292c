//! Search tree vertices.
//!
//! Nodes live in an arena ([`Tree`](super::Tree)) and point at each other by
//! index, so the parent link needs no shared ownership.

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One vertex of the search tree.
#[derive(Clone, Debug)]
pub struct Node<A> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) action: Option<A>,
    /// `(action, child)` pairs in registration order.
    pub(crate) children: Vec<(A, NodeId)>,
    pub(crate) visits: u32,
    pub(crate) q: f64,
    pub(crate) prior: f64,
    pub(crate) u: f64,
}

impl<A: Copy + Eq> Node<A> {
    pub(crate) fn new(parent: Option<NodeId>, action: Option<A>, prior: f64) -> Self {
        Self {
            parent,
            action,
            children: Vec::new(),
            visits: 0,
            q: 0.0,
            prior,
            u: 0.0,
        }
    }

    /// Fresh root with neutral prior.
    pub(crate) fn root() -> Self {
        Self::new(None, None, 1.0)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Action that led here (`None` for the root).
    pub fn action(&self) -> Option<A> {
        self.action
    }

    pub fn children(&self) -> &[(A, NodeId)] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Mean of every value propagated through this node.
    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// Exploration term from the last scoring.
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Child registered for `action`.
    pub fn child(&self, action: A) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|&(_, id)| id)
    }

    /// Counts one visit and folds `value` into the running mean.
    pub(crate) fn update(&mut self, value: f64) {
        self.visits += 1;
        self.q += (value - self.q) / f64::from(self.visits);
    }

    /// PUCT score `Q + u` with `u = c·P·sqrt(N_parent)/(1 + N)`.
    ///
    /// Stores `u` on the node.
    pub(crate) fn score(&mut self, c_puct: f64, parent_visits: u32) -> f64 {
        self.u = c_puct * self.prior * f64::from(parent_visits).sqrt()
            / (1.0 + f64::from(self.visits));
        self.q + self.u
    }
}
