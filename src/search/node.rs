//! Arena-owned search tree nodes.
//!
//! The source (`original_source/cpp/include/search.h`) gives each `Node` an
//! owning `vector<unique_ptr<Node>>` of children. Per the recommended
//! redesign, nodes here live in one contiguous [`Arena`] and reference each
//! other by index instead of by owning pointer: the whole tree is freed as a
//! unit when the arena is dropped at the end of `get_best_move`.

use crate::chess_move::Move;
use crate::position::Position;

/// One node of a Gumbel-MCTS search tree.
///
/// `value` is a running sum of negated child-visit returns (see
/// [`crate::search::mcts`]'s `visit`), not a mean; callers divide by
/// `visit_count` when they need the mean (as Sequential Halving does for
/// its completed-Q estimate).
pub struct Node {
    pub position: Position,
    /// The move that produced this node's position from its parent's.
    /// `None` only for the root.
    pub mv: Option<Move>,
    pub raw_prior: f32,
    pub applied_gumbel: f32,
    pub score: f32,
    pub visit_count: u32,
    pub value: f32,
    pub is_root: bool,
    pub is_terminal: bool,
    /// Indices into the owning [`Arena`]. Empty means unexpanded.
    pub children: Vec<usize>,
}

impl Node {
    pub fn root(position: Position) -> Self {
        Node {
            position,
            mv: None,
            raw_prior: 0.0,
            applied_gumbel: 0.0,
            score: 0.0,
            visit_count: 0,
            value: 0.0,
            is_root: true,
            is_terminal: false,
            children: Vec::new(),
        }
    }

    pub fn child(position: Position, mv: Move, raw_prior: f32) -> Self {
        Node {
            position,
            mv: Some(mv),
            raw_prior,
            applied_gumbel: 0.0,
            score: 0.0,
            visit_count: 0,
            value: 0.0,
            is_root: false,
            is_terminal: false,
            children: Vec::new(),
        }
    }

    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 { 0.0 } else { self.value / self.visit_count as f32 }
    }
}

/// A single search's worth of nodes, indexed rather than pointer-linked.
/// Dropped as a unit at the end of `get_best_move`.
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
