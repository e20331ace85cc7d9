use crate::engine::config::EngineConfig;
use crate::engine::eval::{Heuristic, HeuristicEvaluator, Weights};
use crate::engine::{Evaluator, SearchError, SearchOutcome, SearchStats};
use crate::logic::board::{Board, Side};
use crate::logic::rules::{apply_move, is_terminal, legal_moves};
use std::time::Instant;

/// Window bound for a root search. Heuristic scores stay far inside it.
pub const INFINITY: i32 = i32::MAX;

pub struct AlphaBetaEngine {
    config: EngineConfig,
    evaluator: HeuristicEvaluator,
    nodes_searched: u64,
}

impl AlphaBetaEngine {
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config.heuristic, config.weights),
            config,
            nodes_searched: 0,
        }
    }

    /// Depth-limited minimax from `to_move`'s turn, scored for `maximizing`.
    ///
    /// A move that earns a bonus turn recurses for the same side at the same
    /// depth. Leaves (depth exhausted or a row empty) are scored as they
    /// stand. Ties keep the lowest pit that reached the best score.
    pub fn alpha_beta<const N: usize>(
        &mut self,
        board: &Board<N>,
        maximizing: Side,
        to_move: Side,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<(i32, Option<usize>), SearchError> {
        self.nodes_searched += 1;

        if depth == 0 || is_terminal(board) {
            return Ok((self.evaluator.evaluate(board, maximizing), None));
        }

        let maximizing_node = to_move == maximizing;
        let mut best: Option<(i32, usize)> = None;

        for pit in legal_moves(board, to_move) {
            let child = apply_move(board, pit, to_move)?;
            let (next_side, next_depth) = if child.bonus_turn {
                (to_move, depth)
            } else {
                (to_move.opposite(), depth - 1)
            };

            let (score, _) = self.alpha_beta(&child, maximizing, next_side, next_depth, alpha, beta)?;

            let improved = match best {
                None => true,
                Some((best_score, _)) if maximizing_node => score > best_score,
                Some((best_score, _)) => score < best_score,
            };
            if improved {
                best = Some((score, pit));
            }

            if !self.config.pruning {
                continue;
            }
            if let Some((best_score, _)) = best {
                if maximizing_node {
                    alpha = alpha.max(best_score);
                } else {
                    beta = beta.min(best_score);
                }
            }
            if alpha >= beta {
                break;
            }
        }

        match best {
            Some((score, pit)) => Ok((score, Some(pit))),
            None => Err(SearchError::NoLegalMove { side: to_move }),
        }
    }

    /// Full-window search at the configured depth.
    pub fn search<const N: usize>(
        &mut self,
        board: &Board<N>,
        maximizing: Side,
        to_move: Side,
    ) -> Result<SearchOutcome, SearchError> {
        let depth = self.config.depth;
        if depth == 0 {
            return Err(SearchError::InvalidDepth);
        }
        if is_terminal(board) {
            return Err(SearchError::GameOver);
        }

        self.nodes_searched = 0;
        let start = Instant::now();

        let (score, best_pit) = self.alpha_beta(board, maximizing, to_move, depth, -INFINITY, INFINITY)?;
        let best_pit = best_pit.ok_or(SearchError::NoLegalMove { side: to_move })?;

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            #[allow(clippy::cast_possible_truncation)]
            time_ms: start.elapsed().as_millis() as u64,
        };
        log::debug!(
            "{to_move} ({}, depth {depth}) chose pit {best_pit} score {score} after {} nodes in {}ms",
            self.config.heuristic,
            stats.nodes,
            stats.time_ms
        );

        Ok(SearchOutcome {
            score,
            best_pit,
            stats,
        })
    }
}

/// One-shot search with alpha-beta pruning and an explicit heuristic and
/// weights. Returns the pit `to_move` should play.
pub fn search<const N: usize>(
    board: &Board<N>,
    maximizing: Side,
    to_move: Side,
    depth: u8,
    heuristic: Heuristic,
    weights: Weights,
) -> Result<SearchOutcome, SearchError> {
    let mut engine = AlphaBetaEngine::new(EngineConfig::new(depth, heuristic, weights));
    engine.search(board, maximizing, to_move)
}
