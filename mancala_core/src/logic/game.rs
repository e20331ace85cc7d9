use crate::logic::board::{Board, Side, StandardBoard, STANDARD_PITS};
use crate::logic::rules::{apply_move, is_terminal, MoveError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Finished(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord<const N: usize> {
    pub side: Side,
    pub pit: usize,
    pub bonus_turn: bool,
    pub captured: u16,
    pub board_before: Board<N>,
}

/// The authoritative game: one board, whose turn it is, and the moves that
/// led here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState<const N: usize> {
    pub board: Board<N>,
    pub turn: Side,
    pub status: GameStatus,
    pub history: Vec<MoveRecord<N>>,
}

impl Default for GameState<STANDARD_PITS> {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState<STANDARD_PITS> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(StandardBoard::new(), Side::Top)
    }
}

impl<const N: usize> GameState<N> {
    pub fn from_board(board: Board<N>, turn: Side) -> Self {
        let mut state = Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        state.update_status();
        state
    }

    pub const fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    /// Plays `pit` for the side holding the turn. The turn passes to the
    /// opponent unless the move earned a bonus turn.
    pub fn make_move(&mut self, pit: usize) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let next_board = apply_move(&self.board, pit, self.turn)?;

        self.history.push(MoveRecord {
            side: self.turn,
            pit,
            bonus_turn: next_board.bonus_turn,
            captured: next_board.captured,
            board_before: self.board,
        });
        self.board = next_board;

        if !next_board.bonus_turn {
            self.turn = self.turn.opposite();
        }

        self.update_status();
        if let GameStatus::Finished(outcome) = self.status {
            log::info!(
                "game over after {} moves: {outcome:?} ({}-{})",
                self.history.len(),
                self.board.top_score,
                self.board.bottom_score
            );
        }

        Ok(())
    }

    pub fn undo_move(&mut self) -> bool {
        if let Some(record) = self.history.pop() {
            self.board = record.board_before;
            self.turn = record.side;
            self.status = GameStatus::Playing;
            self.update_status();
            true
        } else {
            false
        }
    }

    fn update_status(&mut self) {
        if !is_terminal(&self.board) {
            self.status = GameStatus::Playing;
            return;
        }

        // A loaded position may be terminal but unswept; rows count for their owner.
        let top = u32::from(self.board.top_score) + self.board.stones_on_side(Side::Top);
        let bottom = u32::from(self.board.bottom_score) + self.board.stones_on_side(Side::Bottom);
        let outcome = match top.cmp(&bottom) {
            Ordering::Greater => Outcome::Winner(Side::Top),
            Ordering::Less => Outcome::Winner(Side::Bottom),
            Ordering::Equal => Outcome::Draw,
        };
        self.status = GameStatus::Finished(outcome);
    }
}
