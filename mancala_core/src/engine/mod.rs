use crate::logic::board::{Board, Side};
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

/// Result of a root search: the pit to play and its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_pit: usize,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    InvalidDepth,
    #[error("no legal move for {side} at a non-terminal position")]
    NoLegalMove { side: Side },
    #[error("the position is already terminal")]
    GameOver,
    #[error(transparent)]
    Move(#[from] MoveError),
}

pub trait Evaluator {
    fn evaluate<const N: usize>(&self, board: &Board<N>, maximizing: Side) -> i32;
}
