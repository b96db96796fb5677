//! Heuristics for use with [MiniMaxBot](crate::ai::minimax::MiniMaxBot).
pub mod chairs;
