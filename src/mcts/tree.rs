//! Arena-allocated search tree.
//!
//! Nodes are stored in a `Vec` and referenced by [`NodeId`]. Re-rooting
//! compacts the arena so that discarded subtrees are actually freed.

use super::node::{Node, NodeId};

/// Search tree with a movable root.
#[derive(Clone, Debug)]
pub struct Tree<A> {
    nodes: Vec<Node<A>>,
    root: NodeId,
}

impl<A: Copy + Eq> Tree<A> {
    /// Tree holding a single fresh root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            root: NodeId(0),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &Node<A> {
        self.get(self.root)
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<A> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<A>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Child of `parent` registered for `action`.
    pub fn child(&self, parent: NodeId, action: A) -> Option<NodeId> {
        self.get(parent).child(action)
    }

    /// Registers a new child under `parent`.
    pub fn add_child(&mut self, parent: NodeId, action: A, prior: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(parent), Some(action), prior));
        self.nodes[parent.0].children.push((action, id));
        id
    }

    /// One child per action with uniform prior `1/|actions|`.
    pub fn expand(&mut self, parent: NodeId, actions: &[A]) {
        if actions.is_empty() {
            return;
        }
        let prior = 1.0 / actions.len() as f64;
        for &action in actions {
            self.add_child(parent, action, prior);
        }
    }

    /// Children of `parent` sorted by PUCT score, best first.
    ///
    /// The sort is stable: equal scores keep registration order.
    pub fn ranked_children(&mut self, parent: NodeId, c_puct: f64) -> Vec<(A, NodeId)> {
        let parent_visits = self.nodes[parent.0].visits;
        let children = self.nodes[parent.0].children.clone();

        let mut scored: Vec<(A, NodeId, f64)> = children
            .into_iter()
            .map(|(action, id)| (action, id, self.nodes[id.0].score(c_puct, parent_visits)))
            .collect();
        scored.sort_by(|a, b| b.2.total_cmp(&a.2));
        scored.into_iter().map(|(action, id, _)| (action, id)).collect()
    }

    /// Folds `value` into `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, value: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.update(value);
            current = node.parent;
        }
    }

    /// Most visited root child accepted by `filter`.
    ///
    /// Ties go to the earliest registered child.
    pub fn most_visited(&self, filter: impl Fn(&A) -> bool) -> Option<A> {
        let mut best: Option<(A, u32)> = None;
        for &(action, id) in &self.root().children {
            if !filter(&action) {
                continue;
            }
            let visits = self.get(id).visits;
            if best.is_none_or(|(_, v)| visits > v) {
                best = Some((action, visits));
            }
        }
        best.map(|(action, _)| action)
    }

    /// Makes the root child for `action` the new root.
    ///
    /// Siblings and the old root are discarded. Without such a child the
    /// tree is reset to a fresh root. Returns whether statistics were kept.
    pub fn reroot(&mut self, action: A) -> bool {
        let Some(new_root) = self.child(self.root, action) else {
            self.reset();
            return false;
        };

        // Breadth-first order keeps every child list in registration order.
        let mut order = vec![new_root];
        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            order.extend(self.nodes[id.0].children.iter().map(|&(_, child)| child));
            next += 1;
        }

        let mut remap = vec![None; self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.0] = Some(NodeId(new));
        }

        let mut slots: Vec<Option<Node<A>>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old in order {
            if let Some(mut node) = slots[old.0].take() {
                node.parent = node.parent.and_then(|p| remap[p.0]);
                for (_, child) in &mut node.children {
                    if let Some(id) = remap[child.0] {
                        *child = id;
                    }
                }
                nodes.push(node);
            }
        }
        if let Some(root) = nodes.first_mut() {
            root.parent = None;
            root.action = None;
        }

        self.nodes = nodes;
        self.root = NodeId(0);
        true
    }

    /// Discards all statistics.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::root());
        self.root = NodeId(0);
    }
}

impl<A: Copy + Eq> Default for Tree<A> {
    fn default() -> Self {
        Self::new()
    }
}
