//! Minimax heuristics for the games in this crate.
pub mod uttt;
