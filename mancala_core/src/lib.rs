//! Kalah (6 pits, 4 stones) with a depth-limited alpha-beta player.
//!
//! `logic` holds the board and the move rules, `engine` the heuristics and
//! the search, and `experiment` plays configured agents against each other.

pub mod engine;
pub mod experiment;
pub mod logic;

pub use engine::config::{ConfigError, EngineConfig};
pub use engine::eval::{Heuristic, Weights};
pub use engine::search::{search, AlphaBetaEngine};
pub use engine::{SearchError, SearchOutcome, SearchStats};
pub use logic::board::{Board, Side, StandardBoard};
pub use logic::game::{GameState, GameStatus, Outcome};
pub use logic::rules::{apply_move, is_terminal, is_viable_move, legal_moves, MoveError};
