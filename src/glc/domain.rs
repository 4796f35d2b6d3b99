//! Cells of the state-space partition
//!
//! A domain is one cell of the integer-coordinate partition induced by
//! flooring the scaled state. It carries the node currently labeling
//! the cell and a queue of candidates that reached the cell this
//! expansion but have not been collision-checked yet. Candidates own
//! their node value and integrated arc; admission moves the node into
//! the arena, rejection drops both.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::common::Trajectory;

use super::node::{Node, NodeId, SENTINEL};

/// Integer coordinate of a cell, ordered lexicographically
pub type CellCoord = Vec<i64>;

/// A node awaiting collision resolution, paired with its arc
#[derive(Debug)]
pub struct Candidate {
    pub node: Node,
    pub arc: Trajectory,
    seq: u64,
}

impl Candidate {
    /// Split into the node value and its integrated arc
    pub fn into_parts(self) -> (Node, Trajectory) {
        (self.node, self.arc)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.node.cost == other.node.cost && self.seq == other.seq
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; equal costs resolve
        // by insertion sequence
        other
            .node
            .cost
            .partial_cmp(&self.node.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One cell of the spatial partition
#[derive(Debug)]
pub struct Domain {
    /// Integer coordinate from flooring the scaled terminal state
    pub coordinate: CellCoord,
    /// Cheapest admitted node whose terminal state falls in this cell;
    /// the sentinel until something is admitted
    pub label: NodeId,
    /// Candidates awaiting collision checks, cheapest first
    pub candidates: BinaryHeap<Candidate>,
}

impl Domain {
    pub fn new(coordinate: CellCoord) -> Self {
        Self {
            coordinate,
            label: SENTINEL,
            candidates: BinaryHeap::new(),
        }
    }

    pub fn push_candidate(&mut self, node: Node, arc: Trajectory, seq: u64) {
        self.candidates.push(Candidate { node, arc, seq });
    }

    /// True when nothing was ever admitted here
    pub fn is_unlabeled(&self) -> bool {
        self.label == SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn candidate_with_cost(cost: f64) -> Node {
        Node::candidate(dvector![0.0], 0.5, cost, cost, 0, 1)
    }

    #[test]
    fn test_candidates_pop_cheapest_first() {
        let mut d = Domain::new(vec![0, 0]);
        d.push_candidate(candidate_with_cost(2.0), Trajectory::new(), 1);
        d.push_candidate(candidate_with_cost(1.0), Trajectory::new(), 2);
        d.push_candidate(candidate_with_cost(3.0), Trajectory::new(), 3);

        let costs: Vec<f64> = std::iter::from_fn(|| d.candidates.pop())
            .map(|c| c.node.cost)
            .collect();
        assert_eq!(costs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_equal_cost_candidates_stay_in_insertion_order() {
        let mut d = Domain::new(vec![0]);
        d.push_candidate(
            Node::candidate(dvector![1.0], 0.5, 1.0, 1.0, 0, 2),
            Trajectory::new(),
            1,
        );
        d.push_candidate(
            Node::candidate(dvector![2.0], 0.5, 1.0, 1.0, 1, 2),
            Trajectory::new(),
            2,
        );

        let first = d.candidates.pop().unwrap();
        let second = d.candidates.pop().unwrap();
        assert_eq!(first.node.u_idx, Some(0));
        assert_eq!(second.node.u_idx, Some(1));
    }

    #[test]
    fn test_new_domain_is_unlabeled() {
        let d = Domain::new(vec![1, -2, 3]);
        assert!(d.is_unlabeled());
        assert!(d.candidates.is_empty());
    }
}
