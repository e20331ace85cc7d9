use crate::engine::config::ConfigError;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scoring weights shared by both agents of a game. Only h2..h4 read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weights {
    pub w1: u8,
    pub w2: u8,
    pub w3: u8,
    pub w4: u8,
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(1, 1, 1, 1)
    }
}

impl Weights {
    pub const fn new(w1: u8, w2: u8, w3: u8, w4: u8) -> Self {
        Self { w1, w2, w3, w4 }
    }

    pub const fn as_array(self) -> [u8; 4] {
        [self.w1, self.w2, self.w3, self.w4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Heuristic {
    /// h1: store difference.
    #[default]
    #[serde(rename = "h1")]
    StoreDifference,
    /// h2: weighted store difference plus weighted stones-on-side difference.
    #[serde(rename = "h2")]
    SideStones,
    /// h3: h2 plus `w3` when the scored board came from a bonus-turn move.
    #[serde(rename = "h3")]
    BonusTurn,
    /// h4: h3 plus `w4` per stone captured by the move that produced the board.
    #[serde(rename = "h4")]
    Capture,
}

impl Heuristic {
    pub const ALL: [Self; 4] = [
        Self::StoreDifference,
        Self::SideStones,
        Self::BonusTurn,
        Self::Capture,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::StoreDifference => "h1",
            Self::SideStones => "h2",
            Self::BonusTurn => "h3",
            Self::Capture => "h4",
        }
    }

    /// Scores `board` from `maximizing`'s point of view; larger is better.
    ///
    /// The bonus and capture terms belong to the move that produced the
    /// board, not to a side, so h3 and h4 add them for whichever side is
    /// maximizing.
    pub fn evaluate<const N: usize>(self, board: &Board<N>, maximizing: Side, weights: &Weights) -> i32 {
        let minimizing = maximizing.opposite();
        let store_diff = i32::from(board.store(maximizing)) - i32::from(board.store(minimizing));
        if self == Self::StoreDifference {
            return store_diff;
        }

        let side_diff = to_i32(board.stones_on_side(maximizing)) - to_i32(board.stones_on_side(minimizing));
        let mut score = i32::from(weights.w1) * store_diff + i32::from(weights.w2) * side_diff;

        if matches!(self, Self::BonusTurn | Self::Capture) && board.bonus_turn {
            score += i32::from(weights.w3);
        }
        if self == Self::Capture {
            score += i32::from(weights.w4) * i32::from(board.captured);
        }
        score
    }
}

fn to_i32(stones: u32) -> i32 {
    i32::try_from(stones).unwrap_or(i32::MAX)
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Heuristic {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h1" | "1" => Ok(Self::StoreDifference),
            "h2" | "2" => Ok(Self::SideStones),
            "h3" | "3" => Ok(Self::BonusTurn),
            "h4" | "4" => Ok(Self::Capture),
            other => Err(ConfigError::UnknownHeuristic(other.to_string())),
        }
    }
}

/// A heuristic bound to the weights it is evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicEvaluator {
    pub heuristic: Heuristic,
    pub weights: Weights,
}

impl HeuristicEvaluator {
    pub const fn new(heuristic: Heuristic, weights: Weights) -> Self {
        Self { heuristic, weights }
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate<const N: usize>(&self, board: &Board<N>, maximizing: Side) -> i32 {
        self.heuristic.evaluate(board, maximizing, &self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::StandardBoard;

    fn sample_board() -> StandardBoard {
        // top: 9 on side, 12 in store; bottom: 17 on side, 10 in store
        StandardBoard::from_parts([1, 2, 3, 0, 0, 3], [5, 5, 5, 1, 1, 0], 12, 10)
    }

    #[test]
    fn test_store_difference() {
        let board = sample_board();
        let w = Weights::new(5, 5, 5, 5);
        assert_eq!(Heuristic::StoreDifference.evaluate(&board, Side::Top, &w), 2);
        assert_eq!(Heuristic::StoreDifference.evaluate(&board, Side::Bottom, &w), -2);
    }

    #[test]
    fn test_side_stones() {
        let board = sample_board();
        let w = Weights::new(3, 2, 5, 5);
        // 3 * (12 - 10) + 2 * (9 - 17)
        assert_eq!(Heuristic::SideStones.evaluate(&board, Side::Top, &w), -10);
        assert_eq!(Heuristic::SideStones.evaluate(&board, Side::Bottom, &w), 10);
    }

    #[test]
    fn test_bonus_and_capture_terms() {
        let mut board = sample_board();
        board.bonus_turn = true;
        board.captured = 4;
        let w = Weights::new(3, 2, 5, 2);

        assert_eq!(Heuristic::BonusTurn.evaluate(&board, Side::Top, &w), -5);
        assert_eq!(Heuristic::Capture.evaluate(&board, Side::Top, &w), 3);

        // The move-relative terms are added for either maximizing side.
        assert_eq!(Heuristic::BonusTurn.evaluate(&board, Side::Bottom, &w), 15);
        assert_eq!(Heuristic::Capture.evaluate(&board, Side::Bottom, &w), 23);
    }

    #[test]
    fn test_flags_ignored_by_lower_heuristics() {
        let mut board = sample_board();
        let w = Weights::new(1, 1, 4, 4);
        let h2 = Heuristic::SideStones.evaluate(&board, Side::Top, &w);
        board.bonus_turn = true;
        board.captured = 6;
        assert_eq!(Heuristic::SideStones.evaluate(&board, Side::Top, &w), h2);
        assert_eq!(Heuristic::StoreDifference.evaluate(&board, Side::Top, &w), 2);
    }

    #[test]
    fn test_labels_round_trip() {
        for h in Heuristic::ALL {
            assert_eq!(h.to_string().parse::<Heuristic>().unwrap(), h);
        }
        assert_eq!("3".parse::<Heuristic>().unwrap(), Heuristic::BonusTurn);
        assert!("h5".parse::<Heuristic>().is_err());
        assert_eq!(serde_json::to_string(&Heuristic::Capture).unwrap(), "\"h4\"");
    }

    #[test]
    fn test_evaluator_matches_heuristic() {
        let board = sample_board();
        let w = Weights::new(2, 3, 4, 5);
        let eval = HeuristicEvaluator::new(Heuristic::SideStones, w);
        assert_eq!(
            eval.evaluate(&board, Side::Bottom),
            Heuristic::SideStones.evaluate(&board, Side::Bottom, &w)
        );
        assert_eq!(w.as_array(), [2, 3, 4, 5]);
    }
}
