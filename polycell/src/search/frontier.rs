//! Priority queue of search nodes.
use ordered_float::OrderedFloat;

use polycell_formula::Assignment;

/// A partial assignment waiting to be expanded.
struct Node {
    score: OrderedFloat<f64>,
    /// Insertion order, used to break ties between equal scores.
    seq: u64,
    assignment: Assignment,
}

impl Node {
    /// Whether this node is dequeued before `other`.
    ///
    /// Higher scores come first, equal scores in insertion order.
    fn precedes(&self, other: &Node) -> bool {
        (self.score, other.seq) > (other.score, self.seq)
    }
}

/// A binary max-heap of assignments keyed by their heuristic score.
///
/// Nodes with equal score are dequeued in the order they were pushed, which makes the order in
/// which a search visits assignments reproducible.
#[derive(Default)]
pub struct Frontier {
    heap: Vec<Node>,
    next_seq: u64,
}

impl Frontier {
    /// Add an assignment with its score.
    pub fn push(&mut self, assignment: Assignment, score: f64) {
        let node = Node {
            score: OrderedFloat(score),
            seq: self.next_seq,
            assignment,
        };
        self.next_seq += 1;
        self.heap.push(node);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove the assignment with the highest score.
    pub fn pop(&mut self) -> Option<(Assignment, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let node = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((node.assignment, node.score.0))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Move a node closer to the root until the heap property is satisfied.
    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent_pos = (pos - 1) / 2;
            if !self.heap[pos].precedes(&self.heap[parent_pos]) {
                return;
            }
            self.heap.swap(pos, parent_pos);
            pos = parent_pos;
        }
    }

    /// Move a node away from the root until the heap property is satisfied.
    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let mut first_pos = pos;

            for &child_pos in [pos * 2 + 1, pos * 2 + 2].iter() {
                if child_pos < self.heap.len()
                    && self.heap[child_pos].precedes(&self.heap[first_pos])
                {
                    first_pos = child_pos;
                }
            }

            if first_pos == pos {
                return;
            }

            self.heap.swap(pos, first_pos);
            pos = first_pos;
        }
    }
}
