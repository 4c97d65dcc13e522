pub mod mcts;
pub mod node;

pub use mcts::GumbelMcts;
pub use node::{Arena, Node};
