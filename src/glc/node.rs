//! Search tree nodes and the arena that owns them
//!
//! Nodes are shared between the tree, the open queue, domain labels,
//! and the `best` slot, so they live in an arena and everything else
//! holds `NodeId` handles. Slot 0 is an infinite-cost sentinel used to
//! bootstrap domain labels and the `best` slot; every real node's cost
//! compares below it.

use crate::common::StateVec;

/// Index handle into the node arena
pub type NodeId = usize;

/// Arena slot of the infinite-cost sentinel
pub const SENTINEL: NodeId = 0;

/// One vertex of the search tree: the terminal point of a simulated
/// arc together with its search bookkeeping.
#[derive(Debug, Clone)]
pub struct Node {
    /// Terminal state of the arc leading into this node
    pub x: StateVec,
    /// Terminal time of that arc
    pub t: f64,
    /// Accumulated path cost from the root
    pub cost: f64,
    /// `cost + h(x)`; the priority key of the open queue
    pub merit: f64,
    /// Index into the control grid of the control that produced this
    /// node; `None` for the root and the sentinel
    pub u_idx: Option<usize>,
    /// 0 at the root, parent depth + 1 otherwise
    pub depth: usize,
    /// Back-link to the predecessor
    pub parent: Option<NodeId>,
    /// Admitted successors, one slot per control
    pub children: Vec<Option<NodeId>>,
}

impl Node {
    /// Root node at time zero with zero accumulated cost
    pub fn root(x0: StateVec, merit: f64, num_controls: usize) -> Self {
        Self {
            x: x0,
            t: 0.0,
            cost: 0.0,
            merit,
            u_idx: None,
            depth: 0,
            parent: None,
            children: vec![None; num_controls],
        }
    }

    /// Candidate node for the arc ending at `x`; parent, depth, and
    /// admission time are stamped by `NodeArena::add_child`.
    pub fn candidate(
        x: StateVec,
        t: f64,
        cost: f64,
        merit: f64,
        u_idx: usize,
        num_controls: usize,
    ) -> Self {
        Self {
            x,
            t,
            cost,
            merit,
            u_idx: Some(u_idx),
            depth: 0,
            parent: None,
            children: vec![None; num_controls],
        }
    }
}

/// Arena of search nodes with index handles
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create an arena holding only the infinite-cost sentinel
    pub fn new() -> Self {
        let sentinel = Node {
            x: StateVec::zeros(0),
            t: 0.0,
            cost: f64::INFINITY,
            merit: f64::INFINITY,
            u_idx: None,
            depth: 0,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![sentinel],
        }
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Admit `child` under `parent`: stamps the back-link, depth, and
    /// admission time, and installs the child in the parent's slot for
    /// its control. This is the only operation that mutates
    /// `children`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, expand_time: f64) {
        let (parent_depth, parent_t) = {
            let p = &self.nodes[parent];
            (p.depth, p.t)
        };
        let u_idx = {
            let c = &mut self.nodes[child];
            c.parent = Some(parent);
            c.depth = parent_depth + 1;
            c.t = parent_t + expand_time;
            c.u_idx
        };
        if let Some(u) = u_idx {
            self.nodes[parent].children[u] = Some(child);
        }
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_sentinel_cost_dominates() {
        let arena = NodeArena::new();
        let s = arena.get(SENTINEL);
        assert!(s.cost > 1e300);
        assert!(s.merit >= s.cost);
    }

    #[test]
    fn test_add_child_wiring() {
        let mut arena = NodeArena::new();
        let root = arena.insert(Node::root(dvector![0.0, 0.0], 1.0, 3));
        let child = arena.insert(Node::candidate(dvector![1.0, 0.0], 0.5, 0.5, 1.5, 2, 3));
        arena.add_child(root, child, 0.5);

        let c = arena.get(child);
        assert_eq!(c.parent, Some(root));
        assert_eq!(c.depth, 1);
        assert!((c.t - 0.5).abs() < 1e-12);
        assert_eq!(arena.get(root).children[2], Some(child));
        assert_eq!(arena.get(root).children[0], None);
    }

    #[test]
    fn test_root_invariants() {
        let root = Node::root(dvector![0.0], 2.0, 2);
        assert_eq!(root.depth, 0);
        assert!(root.parent.is_none());
        assert!(root.u_idx.is_none());
        assert!(root.merit >= root.cost);
    }
}
